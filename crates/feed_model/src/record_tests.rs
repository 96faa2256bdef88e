//! Tests for mapped record types.

use super::*;

fn create_test_record() -> MappedRecord {
    MappedRecord::new(vec![
        MappedField::new("ISBN", "9780306406157", ValueOrigin::Direct),
        MappedField::new("Title", "The Quiet Orchard", ValueOrigin::Direct),
        MappedField::new("Series Name", "", ValueOrigin::Unregistered),
    ])
}

/// Verify value and origin lookup by column.
#[test]
fn test_value_and_origin_lookup() {
    let record = create_test_record();

    assert_eq!(record.value("ISBN"), Some("9780306406157"));
    assert_eq!(record.origin("ISBN"), Some(ValueOrigin::Direct));
    assert_eq!(record.origin("Series Name"), Some(ValueOrigin::Unregistered));
    assert_eq!(record.value("Price"), None);
}

/// Verify set_value replaces in place and keeps the origin.
#[test]
fn test_set_value_keeps_origin() {
    let mut record = create_test_record();

    assert!(record.set_value("Title", "Truncated Title"));
    assert_eq!(record.value("Title"), Some("Truncated Title"));
    assert_eq!(
        record.origin("Title"),
        Some(ValueOrigin::Direct),
        "Correcting a value should not change its origin"
    );

    assert!(
        !record.set_value("Missing", "x"),
        "Setting an absent column should report failure"
    );
}

/// Verify values() returns the row in field order.
#[test]
fn test_values_in_field_order() {
    let record = create_test_record();

    assert_eq!(
        record.values(),
        vec!["9780306406157", "The Quiet Orchard", ""]
    );
}

/// Verify origin display names used in completion reports.
#[test]
fn test_origin_display_names() {
    assert_eq!(ValueOrigin::LlmCompletion.to_string(), "llm-completion");
    assert_eq!(ValueOrigin::ConfigOverride.to_string(), "config-override");
    assert_eq!(ValueOrigin::ForcedBlank.to_string(), "forced-blank");
}
