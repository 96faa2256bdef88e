//! Tests for CSV feed emission.

use super::*;
use feed_model::{MappedField, ValueOrigin};

// ============================================================================
// Test Helpers
// ============================================================================

fn schema() -> ColumnSchema {
    ColumnSchema::new(["ISBN", "Title", "Short Description"]).expect("valid schema")
}

fn record(isbn: &str, title: &str, description: &str) -> MappedRecord {
    MappedRecord::new(vec![
        MappedField::new("ISBN", isbn, ValueOrigin::Direct),
        MappedField::new("Title", title, ValueOrigin::Direct),
        MappedField::new("Short Description", description, ValueOrigin::Direct),
    ])
}

// ============================================================================
// Serialization Tests
// ============================================================================

/// Verify the header row and data rows emit in schema order.
#[test]
fn test_emit_header_and_rows() {
    let emitter = FeedEmitter::new();
    let records = vec![
        record("9780306406157", "The Quiet Orchard", "A guide."),
        record("9781566199094", "Second Title", ""),
    ];

    let outcome = emitter.emit(&records, &schema()).expect("emission succeeds");

    let lines: Vec<&str> = outcome.csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ISBN,Title,Short Description");
    assert_eq!(lines[1], "9780306406157,The Quiet Orchard,A guide.");
    assert_eq!(lines[2], "9781566199094,Second Title,");
    assert!(outcome.skipped.is_empty());
}

/// Verify fields containing delimiters, quotes or newlines are quoted
/// per RFC 4180.
#[test]
fn test_emit_quotes_special_characters() {
    let emitter = FeedEmitter::new();
    let records = vec![record(
        "9780306406157",
        "Orchards, Quietly \"Kept\"",
        "Line one.\nLine two.",
    )];

    let outcome = emitter.emit(&records, &schema()).expect("emission succeeds");

    assert!(
        outcome
            .csv
            .contains("\"Orchards, Quietly \"\"Kept\"\"\""),
        "Embedded commas and quotes must be quoted and doubled, got: {}",
        outcome.csv
    );
    assert!(
        outcome.csv.contains("\"Line one.\nLine two.\""),
        "Embedded newlines must be quoted"
    );
}

/// Verify a record with a mismatched column count is skipped with a
/// clear error while the rest of the batch emits.
#[test]
fn test_emit_skips_misaligned_record() {
    let emitter = FeedEmitter::new();
    let short_record = MappedRecord::new(vec![MappedField::new(
        "ISBN",
        "9780306406157",
        ValueOrigin::Direct,
    )]);
    let records = vec![
        record("9780306406157", "Good Record", "ok"),
        short_record,
        record("9781566199094", "Also Good", "ok"),
    ];

    let outcome = emitter.emit(&records, &schema()).expect("emission succeeds");

    let lines: Vec<&str> = outcome.csv.lines().collect();
    assert_eq!(lines.len(), 3, "Header plus the two aligned records");
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].index, 1);
    assert!(matches!(
        outcome.skipped[0].error,
        EmitError::ColumnCountMismatch {
            record_index: 1,
            expected: 3,
            actual: 1
        }
    ));
    assert_eq!(outcome.emitted_count(records.len()), 2);
}

/// Verify an empty batch still emits the header row.
#[test]
fn test_emit_empty_batch() {
    let emitter = FeedEmitter::new();

    let outcome = emitter.emit(&[], &schema()).expect("emission succeeds");

    assert_eq!(outcome.csv.trim_end(), "ISBN,Title,Short Description");
}
