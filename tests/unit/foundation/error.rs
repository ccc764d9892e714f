use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TimelapseError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TimelapseError::encoder("x")
            .to_string()
            .contains("encoder error:")
    );
    assert!(
        TimelapseError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        TimelapseError::from(ImageSetError::Empty)
            .to_string()
            .contains("image set error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TimelapseError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn mixed_encodings_message_names_both_files() {
    let err = ImageSetError::MixedEncodings {
        first: PathBuf::from("Foo1.jpg"),
        first_encoding: ImageEncoding::Jpeg,
        other: PathBuf::from("Foo2.png"),
        other_encoding: ImageEncoding::Png,
    };
    assert_eq!(
        err.to_string(),
        "Mixed image encodings: 'Foo1.jpg' has encoding 'JPEG', but 'Foo2.png' has encoding 'PNG'."
    );
}

#[test]
fn unknown_extension_message_quotes_extension() {
    let err = ImageSetError::UnknownExtension {
        extension: "bar".to_string(),
    };
    assert_eq!(err.to_string(), "Unknown file extension 'bar'.");
}
