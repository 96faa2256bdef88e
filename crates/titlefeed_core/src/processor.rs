//! The batch processor.
//!
//! One processor instance serves one batch run: it resolves the layer
//! stack once, maps and validates every book independently, emits the
//! CSV feed, and renders the completion report. Only configuration and
//! feed-serialization failures abort the batch; everything else degrades
//! per field or per record.

use crate::defaults::standard_validation;
use crate::errors::BatchResult;
use crate::request::BatchRequest;
use config_manager::{EffectiveConfig, HierarchyResolver};
use feed_emitter::{CompletionReport, FeedEmitter, RecordOutcome, ReportEntry};
use feed_model::{ColumnSchema, MappedRecord};
use field_mapper::FieldMappingRegistry;
use tracing::{info, instrument};
use validation::{CodeSet, FieldFinding, ValidationReport};
use std::sync::Arc;

/// End-of-batch totals, logged and embedded in the completion report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Books processed.
    pub total: usize,
    /// Emitted with no findings at all.
    pub clean: usize,
    /// Emitted, but flagged with validation findings.
    pub flagged: usize,
    /// Not emitted (per-record emission failure).
    pub skipped: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} processed, {} clean, {} emitted with findings, {} skipped",
            self.total, self.clean, self.flagged, self.skipped
        )
    }
}

/// Everything a batch run produces.
#[derive(Debug)]
pub struct BatchOutput {
    /// The distributor CSV feed.
    pub csv: String,
    /// The rendered completion report.
    pub report: String,
    pub summary: BatchSummary,
}

/// Orchestrates resolve, map, validate and emit for one batch.
pub struct BatchProcessor {
    schema: ColumnSchema,
    resolver: HierarchyResolver,
    registry: FieldMappingRegistry,
    bisac: Arc<CodeSet>,
    thema: Arc<CodeSet>,
    emitter: FeedEmitter,
}

impl BatchProcessor {
    pub fn new(
        schema: ColumnSchema,
        registry: FieldMappingRegistry,
        bisac: Arc<CodeSet>,
        thema: Arc<CodeSet>,
    ) -> Self {
        Self {
            schema,
            resolver: HierarchyResolver::new(),
            registry,
            bisac,
            thema,
            emitter: FeedEmitter::new(),
        }
    }

    /// Run one batch end to end.
    ///
    /// The layer stack resolves once and is shared by every book; a book
    /// with a schedule override gets its own resolution on top of the
    /// same stack. Records with validation errors are still emitted but
    /// flagged in the report.
    ///
    /// # Errors
    ///
    /// Returns a batch-fatal error for a malformed layer stack (before
    /// any record is processed) or a feed-writer failure. Per-record
    /// problems never surface here.
    #[instrument(skip_all, fields(books = request.books.len()))]
    pub async fn process(&self, request: &BatchRequest) -> BatchResult<BatchOutput> {
        // Resolve up front so configuration errors abort before any
        // record is touched.
        let base_config = self.resolver.resolve(&request.layers, None)?;
        let pipeline = standard_validation(
            Arc::clone(&self.bisac),
            Arc::clone(&self.thema),
            &base_config,
        );

        let mut records: Vec<MappedRecord> = Vec::with_capacity(request.books.len());
        let mut reports: Vec<ValidationReport> = Vec::with_capacity(request.books.len());

        for entry in &request.books {
            let config: EffectiveConfig = match &entry.schedule_override {
                Some(schedule) => self.resolver.resolve(&request.layers, Some(schedule))?,
                None => base_config.clone(),
            };

            let mut record = self
                .registry
                .map_all(&entry.metadata, &config, &self.schema)
                .await;
            let report = pipeline.validate(&mut record);

            info!(
                book = %entry.identifier(),
                status = %report.status_line(),
                "Mapped and validated record"
            );

            records.push(record);
            reports.push(report);
        }

        let outcome = self.emitter.emit(&records, &self.schema)?;

        let mut entries = Vec::with_capacity(request.books.len());
        for (index, (entry, report)) in request.books.iter().zip(&reports).enumerate() {
            let skip_reason = outcome
                .skipped
                .iter()
                .find(|s| s.index == index)
                .map(|s| s.error.to_string());

            entries.push(ReportEntry {
                identifier: entry.identifier(),
                record: records[index].clone(),
                status: report.status_line(),
                findings: report.findings().iter().map(format_finding).collect(),
                outcome: match skip_reason {
                    Some(reason) => RecordOutcome::Skipped { reason },
                    None => RecordOutcome::Emitted,
                },
            });
        }

        let summary = summarize(&entries);
        let report = CompletionReport::new().render(&entries, &self.schema);

        info!(%summary, "Batch complete");

        Ok(BatchOutput {
            csv: outcome.csv,
            report,
            summary,
        })
    }
}

impl std::fmt::Debug for BatchProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchProcessor")
            .field("schema_columns", &self.schema.len())
            .finish()
    }
}

fn format_finding(finding: &FieldFinding) -> String {
    if finding.suggestions.is_empty() {
        format!("{}: {}", finding.column, finding.message)
    } else {
        format!(
            "{}: {} (suggested: {})",
            finding.column,
            finding.message,
            finding.suggestions.join(", ")
        )
    }
}

fn summarize(entries: &[ReportEntry]) -> BatchSummary {
    let mut summary = BatchSummary {
        total: entries.len(),
        ..Default::default()
    };

    for entry in entries {
        match &entry.outcome {
            RecordOutcome::Skipped { .. } => summary.skipped += 1,
            RecordOutcome::Emitted if entry.status == "clean" => summary.clean += 1,
            RecordOutcome::Emitted => summary.flagged += 1,
        }
    }

    summary
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
