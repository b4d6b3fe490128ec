#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_constants() {
    let config = SketchConfig::default();
    assert_eq!(config.inline_size, Size::new(400, 200));
    assert_eq!(config.background.to_hex(), "#0a0a0a");
    assert_eq!(config.brush_color.to_hex(), "#ff0000");
    assert_eq!(config.line_width, 3.0);
    assert_eq!(config.fullscreen_min_size, Size::new(1600, 900));
    assert!(config.validate().is_ok());
}

#[test]
fn from_json_fills_missing_fields_with_defaults() {
    let config = SketchConfig::from_json(r##"{"brush_color": "#00ff00", "throttle_ms": 8}"##).unwrap();
    assert_eq!(config.brush_color, Color::rgb(0, 255, 0));
    assert_eq!(config.throttle_ms, 8.0);
    assert_eq!(config.inline_size, Size::new(400, 200));
}

#[test]
fn from_json_empty_object_is_default() {
    assert_eq!(SketchConfig::from_json("{}").unwrap(), SketchConfig::default());
}

#[test]
fn from_json_rejects_malformed_input() {
    assert!(matches!(SketchConfig::from_json("{"), Err(SketchError::Config(_))));
    assert!(matches!(SketchConfig::from_json(r#"{"background": "black"}"#), Err(SketchError::Config(_))));
}

#[test]
fn from_json_rejects_zero_inline_size() {
    let err = SketchConfig::from_json(r#"{"inline_size": {"width": 0, "height": 200}}"#).unwrap_err();
    assert!(matches!(err, SketchError::ConfigValue(_)));
}

#[test]
fn validate_rejects_inverted_limits() {
    let config = SketchConfig { inline_max_line_width: 0.5, ..SketchConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_negative_throttle() {
    let config = SketchConfig { throttle_ms: -1.0, ..SketchConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn initial_tool_state_is_clamped_pen() {
    let config = SketchConfig { line_width: 99.0, ..SketchConfig::default() };
    let state = config.initial_tool_state();
    assert_eq!(state.tool, Tool::Pen);
    assert_eq!(state.line_width, 20.0);
    assert_eq!(state.color, Color::rgb(255, 0, 0));
}

#[test]
fn limits_per_surface() {
    let config = SketchConfig::default();
    assert_eq!(config.inline_limits().max, 20.0);
    assert_eq!(config.fullscreen_limits().max, 50.0);
}
