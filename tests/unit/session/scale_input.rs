use super::*;
use std::sync::{Arc, Mutex};

fn recording_input() -> (ScaleInput, Arc<Mutex<Vec<bool>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut input = ScaleInput::new();
    let sink = seen.clone();
    input.set_validity_changed_callback(move |valid| sink.lock().unwrap().push(valid));
    (input, seen)
}

#[test]
fn empty_input_means_no_scaling() {
    let input = ScaleInput::new();
    assert!(input.is_valid());
    assert_eq!(input.scale().unwrap(), None);
}

#[test]
fn complete_input_parses() {
    let mut input = ScaleInput::new();
    input.set_width_and_height(1920, 1080);
    assert_eq!(
        input.scale().unwrap(),
        Some(Scale {
            width: 1920,
            height: 1080
        })
    );
    assert_eq!(input.width_text(), "1920");
    assert_eq!(input.height_text(), "1080");
}

#[test]
fn bad_text_is_invalid() {
    for text in ["1.5", " ", "a", "1a", "-2", "0"] {
        let mut input = ScaleInput::new();
        input.set_width_text(text);
        input.set_height_text("480");
        assert!(!input.is_valid(), "{text:?} should be invalid");
    }
}

#[test]
fn callback_fires_once_per_transition() {
    let (mut input, seen) = recording_input();

    input.set_width_text("640");
    input.set_width_text("64");
    input.set_height_text("48");
    input.set_height_text("");
    input.set_width_text("");

    assert_eq!(*seen.lock().unwrap(), vec![false, true, false, true]);
}

#[test]
fn no_callback_when_validity_is_unchanged() {
    let (mut input, seen) = recording_input();
    input.set_width_and_height(10, 10);
    input.set_width_and_height(20, 20);
    input.clear();
    assert!(seen.lock().unwrap().is_empty());
}
