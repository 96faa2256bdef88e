//! The validation pipeline.
//!
//! A pipeline is an ordered list of independent validators. Every
//! validator runs on every pass - a failure never short-circuits the
//! rest, so the report carries everything wrong with the record at once.

use crate::report::{FieldFinding, ValidationReport};
use feed_model::MappedRecord;
use tracing::debug;

/// One field-level validation rule.
///
/// Implementations examine exactly one field (or one small group, e.g.
/// an amount/currency pair), never depend on another validator's
/// outcome, and report corrections through
/// [`FieldFinding::corrected_value`] rather than mutating the record.
pub trait FieldValidator: Send + Sync {
    fn validate(&self, record: &MappedRecord) -> Vec<FieldFinding>;
}

/// Ordered collection of validators applied to each mapped record.
#[derive(Default)]
pub struct ValidationPipeline {
    validators: Vec<Box<dyn FieldValidator>>,
}

impl ValidationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator to the pass order.
    pub fn with(mut self, validator: Box<dyn FieldValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run every validator over the record and aggregate the report.
    ///
    /// Corrections (e.g. word-boundary truncations) are applied to the
    /// record in place as their findings are collected; a record with
    /// only warning findings is still valid.
    pub fn validate(&self, record: &mut MappedRecord) -> ValidationReport {
        let mut report = ValidationReport::new();

        for validator in &self.validators {
            let findings = validator.validate(record);
            for finding in findings {
                if let Some(corrected) = &finding.corrected_value {
                    record.set_value(&finding.column, corrected.clone());
                }
                report.add(finding);
            }
        }

        debug!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "Validation pass complete"
        );

        report
    }
}

impl std::fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("validators", &self.validators.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
