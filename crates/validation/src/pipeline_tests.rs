//! Tests for the validation pipeline.

use super::*;
use crate::codes::{CodeListValidator, CodeSet};
use crate::isbn::IsbnValidator;
use crate::report::Severity;
use crate::rules::ByteLengthValidator;
use feed_model::{MappedField, ValueOrigin};
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

fn bisac_set() -> Arc<CodeSet> {
    Arc::new(CodeSet::new(
        "BISAC",
        [
            "GAR000000".to_string(),
            "FIC000000".to_string(),
            "FIC019000".to_string(),
        ],
    ))
}

fn standard_pipeline() -> ValidationPipeline {
    ValidationPipeline::new()
        .with(Box::new(IsbnValidator::new("ISBN")))
        .with(Box::new(CodeListValidator::new(
            "BISAC Subject 1",
            bisac_set(),
        )))
        .with(Box::new(ByteLengthValidator::new("Short Description", 350)))
}

fn record(isbn: &str, subject: &str, description: &str) -> MappedRecord {
    MappedRecord::new(vec![
        MappedField::new("ISBN", isbn, ValueOrigin::Direct),
        MappedField::new("BISAC Subject 1", subject, ValueOrigin::Direct),
        MappedField::new("Short Description", description, ValueOrigin::LlmCompletion),
    ])
}

// ============================================================================
// Aggregation Tests
// ============================================================================

/// Verify a clean record passes every validator.
#[test]
fn test_clean_record_is_valid() {
    let pipeline = standard_pipeline();
    let mut rec = record("9780306406157", "GAR000000", "A short blurb.");

    let report = pipeline.validate(&mut rec);

    assert!(report.is_valid());
    assert_eq!(report.findings().len(), 0);
    assert_eq!(report.status_line(), "clean");
}

/// Verify validators are independent: one failure never stops the rest.
///
/// The end-to-end shape from the batch scenario: an ISBN with a bad
/// checksum, an unknown BISAC code and an over-long description must
/// yield two errors plus one truncation warning in a single pass.
#[test]
fn test_failures_do_not_short_circuit() {
    let pipeline = standard_pipeline();
    let long_description = "word ".repeat(100); // 500 bytes
    let mut rec = record("9781234567890", "ZZZ000", &long_description);

    let report = pipeline.validate(&mut rec);

    assert!(!report.is_valid());
    assert_eq!(report.error_count(), 2, "ISBN and BISAC errors both reported");
    assert_eq!(report.warning_count(), 1, "Truncation reported as a warning");
    assert_eq!(report.status_line(), "2 errors, 1 warning");

    let columns: Vec<&str> = report
        .findings()
        .iter()
        .map(|f| f.column.as_str())
        .collect();
    assert_eq!(columns, vec!["ISBN", "BISAC Subject 1", "Short Description"]);

    let bisac = &report.findings()[1];
    assert!(
        !bisac.suggestions.is_empty(),
        "Unknown BISAC code should carry suggestions"
    );
}

/// Verify corrections are applied to the record during the pass.
#[test]
fn test_corrections_applied_to_record() {
    let pipeline = standard_pipeline();
    let long_description = "word ".repeat(100);
    let mut rec = record("9780306406157", "GAR000000", &long_description);

    let report = pipeline.validate(&mut rec);

    assert!(report.is_valid(), "Truncation alone leaves the record valid");
    let corrected = rec.value("Short Description").expect("column present");
    assert!(
        corrected.len() <= 350,
        "Record should carry the truncated value, got {} bytes",
        corrected.len()
    );
}

/// Verify an empty pipeline reports a valid record.
#[test]
fn test_empty_pipeline_is_valid() {
    let pipeline = ValidationPipeline::new();
    let mut rec = record("", "", "");

    let report = pipeline.validate(&mut rec);

    assert!(pipeline.is_empty());
    assert!(report.is_valid());
}

/// Verify findings carry the severity split used by the batch summary.
#[test]
fn test_severity_split() {
    let pipeline = standard_pipeline();
    let mut rec = record("9781234567890", "GAR000000", "fine");

    let report = pipeline.validate(&mut rec);

    assert_eq!(report.error_count(), 1);
    assert_eq!(report.warning_count(), 0);
    assert_eq!(report.findings()[0].severity, Severity::Error);
    assert_eq!(report.status_line(), "1 error");
}
