//! The human-readable completion report.
//!
//! The report parallels the CSV feed: per-record status lines, a
//! per-column fill summary naming the strategy origins that produced
//! each column, and the full finding detail for every flagged field.
//! Counts and percentages only - no further statistics.

use feed_model::{ColumnSchema, MappedRecord};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Whether a record made it into the CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Emitted,
    Skipped { reason: String },
}

/// One record's row in the completion report.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// Identifier shown to the operator - ISBN when assigned, else title.
    pub identifier: String,
    pub record: MappedRecord,
    /// Validation status line, e.g. "clean" or "2 errors, 1 warning".
    pub status: String,
    /// Flagged-field detail lines, already formatted.
    pub findings: Vec<String>,
    pub outcome: RecordOutcome,
}

/// Renders the completion report for one batch.
#[derive(Debug, Clone, Default)]
pub struct CompletionReport {}

impl CompletionReport {
    pub fn new() -> Self {
        Self {}
    }

    /// Render the full report as plain text.
    pub fn render(&self, entries: &[ReportEntry], schema: &ColumnSchema) -> String {
        let mut out = String::new();

        let total = entries.len();
        let clean = entries
            .iter()
            .filter(|e| e.status == "clean" && e.outcome == RecordOutcome::Emitted)
            .count();
        let skipped = entries
            .iter()
            .filter(|e| matches!(e.outcome, RecordOutcome::Skipped { .. }))
            .count();
        let flagged = total - clean - skipped;

        let _ = writeln!(out, "TitleFeed completion report");
        let _ = writeln!(out, "===========================");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Records: {} processed, {} clean, {} emitted with findings, {} skipped",
            total, clean, flagged, skipped
        );
        let _ = writeln!(out);

        self.render_record_section(&mut out, entries);
        self.render_column_section(&mut out, entries, schema);
        self.render_findings_section(&mut out, entries);

        out
    }

    fn render_record_section(&self, out: &mut String, entries: &[ReportEntry]) {
        let _ = writeln!(out, "Records");
        let _ = writeln!(out, "-------");
        for (index, entry) in entries.iter().enumerate() {
            let outcome = match &entry.outcome {
                RecordOutcome::Emitted => entry.status.clone(),
                RecordOutcome::Skipped { reason } => format!("skipped: {}", reason),
            };
            let _ = writeln!(out, "{:>4}  {:<20} {}", index + 1, entry.identifier, outcome);
        }
        let _ = writeln!(out);
    }

    fn render_column_section(
        &self,
        out: &mut String,
        entries: &[ReportEntry],
        schema: &ColumnSchema,
    ) {
        let _ = writeln!(out, "Columns");
        let _ = writeln!(out, "-------");
        let _ = writeln!(out, "{:<32} {:>8} {:>7}  Origins", "Column", "Filled", "Fill %");

        let total = entries.len();
        for column in schema.iter() {
            let mut filled = 0usize;
            let mut origins: BTreeSet<String> = BTreeSet::new();

            for entry in entries {
                if let Some(value) = entry.record.value(column) {
                    if !value.is_empty() {
                        filled += 1;
                    }
                }
                if let Some(origin) = entry.record.origin(column) {
                    origins.insert(origin.to_string());
                }
            }

            let percent = if total == 0 {
                0
            } else {
                filled * 100 / total
            };
            let origins: Vec<String> = origins.into_iter().collect();
            let _ = writeln!(
                out,
                "{:<32} {:>5}/{:<2} {:>6}%  {}",
                column,
                filled,
                total,
                percent,
                origins.join(", ")
            );
        }
        let _ = writeln!(out);
    }

    fn render_findings_section(&self, out: &mut String, entries: &[ReportEntry]) {
        let flagged: Vec<(usize, &ReportEntry)> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.findings.is_empty())
            .collect();

        if flagged.is_empty() {
            return;
        }

        let _ = writeln!(out, "Findings");
        let _ = writeln!(out, "--------");
        for (index, entry) in flagged {
            for finding in &entry.findings {
                let _ = writeln!(out, "record {} ({}): {}", index + 1, entry.identifier, finding);
            }
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
