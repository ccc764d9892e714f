use super::*;

fn write_config(name: &str, json: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn empty_object_yields_defaults() {
    let path = write_config("empty.json", "{}");
    let cfg = TimelapseConfig::from_path(&path).unwrap();
    assert_eq!(cfg, TimelapseConfig::default());
    assert_eq!(cfg.frame_rate().unwrap().get(), 24.0);
    assert_eq!(cfg.poll_interval(), Duration::from_millis(100));
    assert_eq!(cfg.encoder.location(), EncoderLocation::on_path());
}

#[test]
fn encoder_section_maps_to_location() {
    let path = write_config(
        "encoder.json",
        r#"{ "encoder": { "install_dir": "/opt/mplayer", "program": "/opt/mplayer/mencoder-1.4" }, "frames_per_second": 30 }"#,
    );
    let cfg = TimelapseConfig::from_path(&path).unwrap();
    assert_eq!(
        cfg.encoder.location(),
        EncoderLocation::in_dir("/opt/mplayer").with_program("/opt/mplayer/mencoder-1.4")
    );
    assert_eq!(cfg.frame_rate().unwrap().get(), 30.0);
}

#[test]
fn unknown_fields_are_rejected() {
    let path = write_config("unknown.json", r#"{ "fps": 30 }"#);
    let err = TimelapseConfig::from_path(&path).unwrap_err();
    assert!(matches!(err, TimelapseError::Config(_)));
}

#[test]
fn out_of_range_values_are_rejected() {
    let path = write_config("zero_fps.json", r#"{ "frames_per_second": 0 }"#);
    assert!(TimelapseConfig::from_path(&path).is_err());

    let path = write_config("zero_poll.json", r#"{ "poll_interval_ms": 0 }"#);
    assert!(TimelapseConfig::from_path(&path).is_err());
}

#[test]
fn missing_file_is_a_config_error() {
    let err = TimelapseConfig::from_path(Path::new("target/unit_config/absent.json")).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}
