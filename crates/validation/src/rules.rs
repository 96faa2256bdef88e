//! Format and length validators.
//!
//! Each validator examines one field (or one small group, like an
//! amount/currency pair) of a mapped record. None of them mutates the
//! record directly; the byte-length rule reports a corrected value which
//! the pipeline applies.

use crate::pipeline::FieldValidator;
use crate::report::FieldFinding;
use chrono::NaiveDate;
use feed_model::MappedRecord;
use regex::Regex;
use tracing::warn;

/// Currency codes the distributor accepts.
const ACCEPTED_CURRENCIES: &[&str] = &["USD", "GBP", "EUR", "CAD", "AUD"];

/// Validates a YYYYMMDD date column.
#[derive(Debug, Clone)]
pub struct DateValidator {
    column: String,
    format: Regex,
}

impl DateValidator {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            format: Regex::new(r"^\d{8}$").expect("static pattern compiles"),
        }
    }
}

impl FieldValidator for DateValidator {
    fn validate(&self, record: &MappedRecord) -> Vec<FieldFinding> {
        let value = match record.value(&self.column) {
            Some(value) if !value.is_empty() => value,
            _ => return Vec::new(),
        };

        if !self.format.is_match(value) {
            return vec![FieldFinding::error(
                self.column.clone(),
                format!("Date must be YYYYMMDD, got '{}'", value),
            )];
        }

        if NaiveDate::parse_from_str(value, "%Y%m%d").is_err() {
            return vec![FieldFinding::error(
                self.column.clone(),
                format!("'{}' is not a calendar date", value),
            )];
        }

        Vec::new()
    }
}

/// Validates an amount/currency column pair for one territory.
#[derive(Debug, Clone)]
pub struct PriceValidator {
    amount_column: String,
    currency_column: String,
    amount_format: Regex,
}

impl PriceValidator {
    pub fn new(amount_column: impl Into<String>, currency_column: impl Into<String>) -> Self {
        Self {
            amount_column: amount_column.into(),
            currency_column: currency_column.into(),
            amount_format: Regex::new(r"^\d+(\.\d{1,2})?$").expect("static pattern compiles"),
        }
    }
}

impl FieldValidator for PriceValidator {
    fn validate(&self, record: &MappedRecord) -> Vec<FieldFinding> {
        let mut findings = Vec::new();

        if let Some(amount) = record.value(&self.amount_column) {
            if !amount.is_empty() && !self.amount_format.is_match(amount) {
                findings.push(FieldFinding::error(
                    self.amount_column.clone(),
                    format!(
                        "Price must be a non-negative amount with at most two decimals, got '{}'",
                        amount
                    ),
                ));
            }
        }

        if let Some(currency) = record.value(&self.currency_column) {
            if !currency.is_empty() && !ACCEPTED_CURRENCIES.contains(&currency) {
                findings.push(
                    FieldFinding::error(
                        self.currency_column.clone(),
                        format!("'{}' is not an accepted currency code", currency),
                    )
                    .with_suggestions(
                        ACCEPTED_CURRENCIES.iter().map(|c| c.to_string()).collect(),
                    ),
                );
            }
        }

        findings
    }
}

/// Validates an asset path column against its configured naming template.
///
/// The expected name is the template with `{isbn}` filled from the
/// record's ISBN column. Templates with placeholders this validator
/// cannot render from the record are skipped.
#[derive(Debug, Clone)]
pub struct FileNamingValidator {
    column: String,
    isbn_column: String,
    template: String,
}

impl FileNamingValidator {
    pub fn new(
        column: impl Into<String>,
        isbn_column: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            isbn_column: isbn_column.into(),
            template: template.into(),
        }
    }
}

impl FieldValidator for FileNamingValidator {
    fn validate(&self, record: &MappedRecord) -> Vec<FieldFinding> {
        let value = match record.value(&self.column) {
            Some(value) if !value.is_empty() => value,
            _ => return Vec::new(),
        };

        let isbn = record.value(&self.isbn_column).unwrap_or("");
        let expected = self.template.replace("{isbn}", isbn);
        if expected.contains('{') {
            // Unresolvable placeholder; nothing to check against.
            return Vec::new();
        }

        if value != expected {
            return vec![FieldFinding::error(
                self.column.clone(),
                format!(
                    "File name '{}' does not follow the configured convention",
                    value
                ),
            )
            .with_suggestions(vec![expected])];
        }

        Vec::new()
    }
}

/// Enforces a byte-length ceiling, truncating at a word boundary.
///
/// Byte length, not character count: the distributor's limit applies to
/// the encoded field and multi-byte text would otherwise slip past a
/// character count. Violations are corrected and reported as warnings,
/// so the record keeps flowing.
#[derive(Debug, Clone)]
pub struct ByteLengthValidator {
    column: String,
    max_bytes: usize,
}

impl ByteLengthValidator {
    pub fn new(column: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            column: column.into(),
            max_bytes,
        }
    }
}

impl FieldValidator for ByteLengthValidator {
    fn validate(&self, record: &MappedRecord) -> Vec<FieldFinding> {
        let value = match record.value(&self.column) {
            Some(value) if value.len() > self.max_bytes => value,
            _ => return Vec::new(),
        };

        let truncated = truncate_at_word_boundary(value, self.max_bytes);

        warn!(
            column = %self.column,
            original = %value,
            truncated = %truncated,
            "Value exceeds {} bytes, truncated at word boundary",
            self.max_bytes
        );

        vec![FieldFinding::warning(
            self.column.clone(),
            format!(
                "Value is {} bytes, limit is {}; truncated to {} bytes",
                value.len(),
                self.max_bytes,
                truncated.len()
            ),
        )
        .with_correction(truncated)]
    }
}

/// Cut a string to at most `max_bytes`, preferring the last word
/// boundary and never splitting a UTF-8 character.
pub fn truncate_at_word_boundary(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }

    // Largest char boundary not past the byte limit.
    let mut cut = max_bytes;
    while cut > 0 && !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let hard_cut = &text[..cut];

    // Prefer the last whitespace so no word is split mid-way.
    match hard_cut.rfind(char::is_whitespace) {
        Some(boundary) if boundary > 0 => hard_cut[..boundary].trim_end().to_string(),
        _ => hard_cut.to_string(),
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
