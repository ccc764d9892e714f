use super::*;

#[test]
fn extension_classification_is_case_and_dot_insensitive() {
    assert_eq!(ImageEncoding::from_extension(".jpg"), Ok(ImageEncoding::Jpeg));
    assert_eq!(ImageEncoding::from_extension("jpg"), Ok(ImageEncoding::Jpeg));
    assert_eq!(ImageEncoding::from_extension("JPG"), Ok(ImageEncoding::Jpeg));
    assert_eq!(ImageEncoding::from_extension(".jpeg"), Ok(ImageEncoding::Jpeg));
    assert_eq!(ImageEncoding::from_extension(".png"), Ok(ImageEncoding::Png));
    assert_eq!(
        ImageEncoding::from_extension(".other"),
        Err(ImageSetError::UnknownExtension {
            extension: "other".to_string()
        })
    );
}

#[test]
fn path_classification_uses_final_extension() {
    assert_eq!(
        ImageEncoding::from_path(Path::new("~/Foo.jpg")),
        Ok(ImageEncoding::Jpeg)
    );
    assert_eq!(
        ImageEncoding::from_path(Path::new("shots/day.1.PNG")),
        Ok(ImageEncoding::Png)
    );
    assert_eq!(
        ImageEncoding::from_path(Path::new("README")),
        Err(ImageSetError::UnknownExtension {
            extension: String::new()
        })
    );
}

#[test]
fn uniform_sets_report_their_encoding() {
    assert_eq!(
        detect_encoding(&["Foo1.jpg", "Foo2.jpg"]),
        Ok(ImageEncoding::Jpeg)
    );
    assert_eq!(
        detect_encoding(&["a.jpg", "b.JPEG", "c.jpeg"]),
        Ok(ImageEncoding::Jpeg)
    );
    assert_eq!(detect_encoding(&["Foo1.png"]), Ok(ImageEncoding::Png));
}

#[test]
fn mixed_sets_name_both_offending_files() {
    let err = detect_encoding(&["Foo1.jpg", "Foo2.png"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Mixed image encodings: 'Foo1.jpg' has encoding 'JPEG', but 'Foo2.png' has encoding 'PNG'."
    );
}

#[test]
fn unknown_extension_is_reported_wherever_it_appears() {
    let err = detect_encoding(&["Foo1.bar", "Foo2.jpg"]).unwrap_err();
    assert_eq!(err.to_string(), "Unknown file extension 'bar'.");

    let err = detect_encoding(&["Foo1.png", "Foo2.gif"]).unwrap_err();
    assert_eq!(err.to_string(), "Unknown file extension 'gif'.");
}

#[test]
fn empty_set_is_rejected() {
    let none: [&str; 0] = [];
    assert_eq!(detect_encoding(&none), Err(ImageSetError::Empty));
}

#[test]
fn encoder_type_tokens() {
    assert_eq!(ImageEncoding::Jpeg.encoder_type(), "jpg");
    assert_eq!(ImageEncoding::Png.encoder_type(), "png");
}
