//! End-to-end tests for the batch processor.

use super::*;
use crate::defaults::{standard_registry, standard_schema};
use crate::errors::BatchError;
use crate::request::{BatchRequest, BookEntry};
use async_trait::async_trait;
use config_manager::{ConfigLayer, LayerLevel, ScheduleOverride};
use feed_model::{BookMetadata, Contributor, PhysicalSpecs, TerritoryPrice};
use llm_client::{
    CompletionRequest, DisabledFieldCompleter, Error as CompletionError, FieldCompleter,
};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

// ============================================================================
// Test Helpers
// ============================================================================

/// A completer that replays a scripted sequence of outcomes.
struct ScriptedCompleter {
    responses: Mutex<VecDeque<Result<String, CompletionError>>>,
}

impl ScriptedCompleter {
    fn new(responses: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl FieldCompleter for ScriptedCompleter {
    async fn complete_field(
        &self,
        _request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        self.responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or(Err(CompletionError::Disabled))
    }
}

fn bisac_set() -> Arc<CodeSet> {
    Arc::new(CodeSet::new(
        "BISAC",
        [
            "GAR000000".to_string(),
            "GAR004000".to_string(),
            "FIC000000".to_string(),
        ],
    ))
}

fn thema_set() -> Arc<CodeSet> {
    Arc::new(CodeSet::new("Thema", ["WM".to_string(), "FB".to_string()]))
}

fn processor_with(completer: Arc<dyn FieldCompleter>) -> BatchProcessor {
    BatchProcessor::new(
        standard_schema(),
        standard_registry(completer),
        bisac_set(),
        thema_set(),
    )
}

/// A fully-populated book that maps and validates cleanly.
fn clean_book() -> BookMetadata {
    BookMetadata {
        title: "The Quiet Orchard".to_string(),
        subtitle: Some("A Field Guide".to_string()),
        contributors: vec![Contributor {
            name: "Jane Q. Author".to_string(),
            role: "A01".to_string(),
            biography: Some("Jane writes about orchards.".to_string()),
        }],
        isbn13: Some("9780306406157".to_string()),
        prices: vec![TerritoryPrice {
            territory: "US".to_string(),
            amount: "19.99".to_string(),
            currency: "USD".to_string(),
        }],
        bisac_codes: vec!["GAR000000".to_string()],
        thema_codes: vec!["WM".to_string()],
        physical: PhysicalSpecs {
            page_count: 248,
            trim_width_mm: Some(152.4),
            trim_height_mm: Some(228.6),
            paper_stock: Some("creme-50lb".to_string()),
        },
        short_description: Some("A guide to quiet orchards.".to_string()),
        long_description: None,
        publication_date: Some("20250301".to_string()),
        series_name: Some("Orchard Guides".to_string()),
        cover_path: Some("9780306406157_cover.pdf".to_string()),
        interior_path: Some("9780306406157_interior.pdf".to_string()),
        llm_completions: Default::default(),
    }
}

// ============================================================================
// Clean Batch Tests
// ============================================================================

/// Verify a clean book emits with a clean summary.
#[tokio::test]
async fn test_clean_batch() {
    let processor = processor_with(Arc::new(DisabledFieldCompleter));
    let request = BatchRequest::new(vec![BookEntry::new(clean_book())], vec![]);

    let output = processor.process(&request).await.expect("batch succeeds");

    assert_eq!(
        output.summary,
        BatchSummary {
            total: 1,
            clean: 1,
            flagged: 0,
            skipped: 0
        }
    );
    let lines: Vec<&str> = output.csv.lines().collect();
    assert_eq!(lines.len(), 2, "Header plus one record");
    assert!(lines[1].starts_with("9780306406157,The Quiet Orchard"));
    assert!(output.report.contains("1 processed, 1 clean"));
}

// ============================================================================
// Flagged Record Scenario
// ============================================================================

/// The end-to-end failure scenario: an invalid-checksum ISBN, an unknown
/// BISAC code and a 500-byte short description. The record is still
/// emitted, but the report marks it "2 errors, 1 warning" and the
/// description is truncated at a word boundary.
#[tokio::test]
async fn test_flagged_record_still_emits() {
    let processor = processor_with(Arc::new(DisabledFieldCompleter));

    let mut book = clean_book();
    book.isbn13 = Some("9781234567890".to_string());
    book.bisac_codes = vec!["ZZZ000".to_string()];
    book.short_description = Some("word ".repeat(100)); // 500 bytes
    book.cover_path = None;
    book.interior_path = None;

    let request = BatchRequest::new(vec![BookEntry::new(book)], vec![]);
    let output = processor.process(&request).await.expect("batch succeeds");

    assert_eq!(
        output.summary,
        BatchSummary {
            total: 1,
            clean: 0,
            flagged: 1,
            skipped: 0
        }
    );

    // Still emitted to CSV despite the errors.
    assert_eq!(output.csv.lines().count(), 2);

    assert!(output.report.contains("2 errors, 1 warning"));
    assert!(output.report.contains("fails its checksum"));
    assert!(
        output.report.contains("not a valid BISAC code"),
        "BISAC failure must be reported with suggestions: {}",
        output.report
    );
    assert!(output.report.contains("suggested:"));
    assert!(output.report.contains("truncated"));
}

// ============================================================================
// Configuration Interaction Tests
// ============================================================================

/// Verify a non-append tranche field override beats the completion
/// strategy's output for the same column.
#[tokio::test]
async fn test_tranche_field_override_wins_over_completion() {
    // The completer would produce "Beta Series" for the series column.
    let completer = Arc::new(ScriptedCompleter::new(vec![Ok("Beta Series".to_string())]));
    let processor = processor_with(completer);

    let mut book = clean_book();
    book.series_name = None; // force the completion path

    let mut tranche = ConfigLayer::empty(LayerLevel::Tranche);
    tranche
        .field_overrides
        .insert("Series Name".to_string(), "Alpha Series".to_string());

    let request = BatchRequest::new(vec![BookEntry::new(book)], vec![tranche]);
    let output = processor.process(&request).await.expect("batch succeeds");

    assert!(
        output.csv.contains("Alpha Series"),
        "Override must win: {}",
        output.csv
    );
    assert!(!output.csv.contains("Beta Series"));
}

/// Verify a per-book schedule override wins over a tranche value for
/// the same key.
#[tokio::test]
async fn test_schedule_override_wins_over_tranche() {
    let processor = processor_with(Arc::new(DisabledFieldCompleter));

    let mut tranche = ConfigLayer::empty(LayerLevel::Tranche);
    tranche
        .values
        .insert("subtitle".to_string(), "Tranche Subtitle".to_string());

    let mut schedule_values = BTreeMap::new();
    schedule_values.insert("subtitle".to_string(), "Schedule Subtitle".to_string());
    let entry = BookEntry::new(clean_book())
        .with_schedule_override(ScheduleOverride::new(schedule_values));

    let request = BatchRequest::new(vec![entry], vec![tranche]);
    let output = processor.process(&request).await.expect("batch succeeds");

    assert!(output.csv.contains("Schedule Subtitle"));
    assert!(!output.csv.contains("Tranche Subtitle"));
}

/// Verify completion retry at the batch level: a timeout then a success
/// yields the retried value; persistent failure yields the fallback.
#[tokio::test]
async fn test_completion_retry_and_fallback() {
    let completer = Arc::new(ScriptedCompleter::new(vec![
        Err(CompletionError::Timeout),
        Ok("Generated Bio".to_string()),
    ]));
    let processor = processor_with(completer);

    let mut book = clean_book();
    book.contributors[0].biography = None; // force the completion path
    book.series_name = Some("Orchard Guides".to_string());

    let request = BatchRequest::new(vec![BookEntry::new(book)], vec![]);
    let output = processor.process(&request).await.expect("batch succeeds");

    assert!(
        output.csv.contains("Generated Bio"),
        "Retry value must be used: {}",
        output.csv
    );
    assert_eq!(output.summary.clean, 1, "A retried completion is not a finding");
}

/// Verify a malformed layer stack aborts before any record processing.
#[tokio::test]
async fn test_bad_layer_stack_aborts_batch() {
    let processor = processor_with(Arc::new(DisabledFieldCompleter));

    let layers = vec![
        ConfigLayer::empty(LayerLevel::Tranche),
        ConfigLayer::empty(LayerLevel::Default),
    ];
    let request = BatchRequest::new(vec![BookEntry::new(clean_book())], layers);

    let result = processor.process(&request).await;

    assert!(matches!(result, Err(BatchError::Configuration(_))));
}

// ============================================================================
// File Naming Validation Tests
// ============================================================================

/// Verify configured path templates drive both mapping and validation:
/// the mapped asset path follows the template and therefore validates.
#[tokio::test]
async fn test_path_templates_map_and_validate() {
    let processor = processor_with(Arc::new(DisabledFieldCompleter));

    let mut imprint = ConfigLayer::empty(LayerLevel::Imprint);
    imprint
        .file_path_templates
        .insert("cover".to_string(), "{isbn}_cover.pdf".to_string());
    imprint
        .file_path_templates
        .insert("interior".to_string(), "{isbn}_interior.pdf".to_string());

    let mut book = clean_book();
    book.cover_path = Some("ignored-when-template-set.pdf".to_string());

    let request = BatchRequest::new(vec![BookEntry::new(book)], vec![imprint]);
    let output = processor.process(&request).await.expect("batch succeeds");

    assert!(output.csv.contains("9780306406157_cover.pdf"));
    assert_eq!(output.summary.clean, 1);
}
