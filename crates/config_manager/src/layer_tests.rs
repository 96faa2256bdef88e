//! Tests for configuration layer types.

use super::*;

/// Verify level ordering matches hierarchy specificity.
#[test]
fn test_layer_level_ordering() {
    assert!(LayerLevel::Default < LayerLevel::Publisher);
    assert!(LayerLevel::Publisher < LayerLevel::Imprint);
    assert!(LayerLevel::Imprint < LayerLevel::Tranche);
}

/// Verify level display names used in error messages.
#[test]
fn test_layer_level_display() {
    assert_eq!(LayerLevel::Default.to_string(), "default");
    assert_eq!(LayerLevel::Tranche.to_string(), "tranche");
}

/// Verify an empty layer has no values or annotations.
#[test]
fn test_empty_layer() {
    let layer = ConfigLayer::empty(LayerLevel::Imprint);

    assert_eq!(layer.level, LayerLevel::Imprint);
    assert!(layer.values.is_empty());
    assert!(layer.append_fields.is_empty());
    assert!(!layer.is_append_field("keywords"));
}

/// Verify layer deserialization defaults missing annotation lists.
#[test]
fn test_layer_deserializes_with_defaults() {
    let json = r#"{ "level": "tranche", "values": { "tranche_code": "WAVE-7" } }"#;

    let layer: ConfigLayer = serde_json::from_str(json).expect("layer parses");

    assert_eq!(layer.level, LayerLevel::Tranche);
    assert_eq!(layer.values.get("tranche_code").map(String::as_str), Some("WAVE-7"));
    assert!(layer.append_fields.is_empty());
    assert!(layer.field_overrides.is_empty());
}

/// Verify an empty schedule override reports empty.
#[test]
fn test_schedule_override_empty() {
    let schedule = ScheduleOverride::default();
    assert!(schedule.is_empty());
}
