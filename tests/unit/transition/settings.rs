use super::*;

#[test]
fn empty_json_uses_defaults() {
    let settings = TransitionSettings::from_json("{}").unwrap();
    assert_eq!(settings, TransitionSettings::default());
    assert!(!settings.invert);
    assert_eq!(settings.color_target_a, 0xffffffff);
    assert_eq!(settings.color_target_b, 0xff000000);
    assert!(settings.mask.is_none());
}

#[test]
fn parses_video_mask_with_monitoring() {
    let settings = TransitionSettings::from_json(
        r#"{
            "mask": {"mode": "video", "path": "wipes/swirl.webm", "audio_monitoring": "monitor_only"},
            "invert": true,
            "color_target_b": 4278190335
        }"#,
    )
    .unwrap();
    assert!(settings.invert);
    assert_eq!(settings.color_target_b, 0xff0000ff);
    assert_eq!(
        settings.mask,
        Some(MaskSettings::Video {
            path: PathBuf::from("wipes/swirl.webm"),
            audio_monitoring: MonitoringType::MonitorOnly,
        })
    );
}

#[test]
fn video_monitoring_defaults_to_none() {
    let settings =
        TransitionSettings::from_json(r#"{"mask": {"mode": "video", "path": "a.mp4"}}"#).unwrap();
    assert_eq!(settings, TransitionSettings::video("a.mp4"));
}

#[test]
fn parses_image_mask_by_name_or_path() {
    let named =
        TransitionSettings::from_json(r#"{"mask": {"mode": "image", "name": "Clock"}}"#).unwrap();
    assert_eq!(named, TransitionSettings::image_named("Clock"));

    let direct =
        TransitionSettings::from_json(r#"{"mask": {"mode": "image", "path": "/tmp/x.gif"}}"#)
            .unwrap();
    assert_eq!(direct, TransitionSettings::image_path("/tmp/x.gif"));
}

#[test]
fn rejects_unknown_mode_and_bad_json() {
    let err = TransitionSettings::from_json(r#"{"mask": {"mode": "shape"}}"#).unwrap_err();
    assert!(matches!(err, WipeError::Serde(_)));
    assert!(TransitionSettings::from_json("{").is_err());
}

#[test]
fn json_round_trip_keeps_settings() {
    let mut settings = TransitionSettings::image_named("Bars");
    settings.invert = true;
    let json = settings.to_json().unwrap();
    assert!(json.contains("\"mode\": \"image\""));
    assert!(!json.contains("\"path\""));
    assert_eq!(TransitionSettings::from_json(&json).unwrap(), settings);
}

#[test]
fn state_applies_visual_settings_only() {
    let mut state = TransitionState {
        transitioning: true,
        ..TransitionState::default()
    };
    assert_eq!(state.color_target_a, ColorVec4::WHITE);
    assert_eq!(state.color_target_b, ColorVec4::BLACK);

    let settings = TransitionSettings {
        invert: true,
        color_target_a: 0xff0000ff,
        ..TransitionSettings::default()
    };
    state.apply(&settings);
    assert!(state.invert);
    assert!(state.transitioning);
    assert_eq!(state.color_target_a.rgb(), [1.0, 0.0, 0.0]);
}
