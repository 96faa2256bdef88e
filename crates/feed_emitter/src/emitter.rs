//! CSV serialization against the fixed column schema.

use crate::errors::EmitError;
use feed_model::{ColumnSchema, MappedRecord};
use tracing::{error, info};

/// One record the emitter refused to serialize.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Zero-based position in the batch.
    pub index: usize,
    pub error: EmitError,
}

/// Result of emitting one batch.
#[derive(Debug)]
pub struct EmitOutcome {
    /// The full CSV text: one header row plus one row per emitted record.
    pub csv: String,
    /// Records skipped for per-record failures, in batch order.
    pub skipped: Vec<SkippedRecord>,
}

impl EmitOutcome {
    pub fn emitted_count(&self, total: usize) -> usize {
        total - self.skipped.len()
    }
}

/// Serializes mapped records into the distributor CSV layout.
#[derive(Debug, Clone, Default)]
pub struct FeedEmitter {}

impl FeedEmitter {
    pub fn new() -> Self {
        Self {}
    }

    /// Emit the header row and one data row per record.
    ///
    /// Rows are quoted per RFC 4180 by the underlying writer. A record
    /// whose field count differs from the header count is skipped and
    /// reported in the outcome; the remaining records still emit.
    ///
    /// # Errors
    ///
    /// Returns `EmitError` only for failures of the writer itself -
    /// per-record count mismatches are collected, not raised.
    pub fn emit(
        &self,
        records: &[MappedRecord],
        schema: &ColumnSchema,
    ) -> Result<EmitOutcome, EmitError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(schema.header())?;

        let mut skipped = Vec::new();

        for (index, record) in records.iter().enumerate() {
            if record.len() != schema.len() {
                let emit_error = EmitError::ColumnCountMismatch {
                    record_index: index,
                    expected: schema.len(),
                    actual: record.len(),
                };
                error!(
                    record_index = index,
                    expected = schema.len(),
                    actual = record.len(),
                    "Skipping record with misaligned column count"
                );
                skipped.push(SkippedRecord {
                    index,
                    error: emit_error,
                });
                continue;
            }

            writer.write_record(record.values())?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| EmitError::Csv(csv::Error::from(e.into_error())))?;
        let csv = String::from_utf8(bytes).map_err(|_| EmitError::InvalidUtf8)?;

        info!(
            records = records.len(),
            skipped = skipped.len(),
            "Feed emission complete"
        );

        Ok(EmitOutcome { csv, skipped })
    }
}

#[cfg(test)]
#[path = "emitter_tests.rs"]
mod tests;
