//! ISBN-13 checksum validation.
//!
//! The check digit is the ten's complement of the weighted sum of the
//! first twelve digits, weights alternating 1 and 3. A mismatch is an
//! error, not a warning - the distributor rejects bad ISBNs outright.

use crate::pipeline::FieldValidator;
use crate::report::FieldFinding;
use feed_model::MappedRecord;

/// Compute the ISBN-13 check digit for twelve leading digits.
///
/// Returns `None` unless `first_twelve` is exactly twelve ASCII digits.
pub fn check_digit(first_twelve: &str) -> Option<u32> {
    if first_twelve.len() != 12 || !first_twelve.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let sum: u32 = first_twelve
        .bytes()
        .enumerate()
        .map(|(index, byte)| {
            let digit = u32::from(byte - b'0');
            if index % 2 == 0 {
                digit
            } else {
                digit * 3
            }
        })
        .sum();

    Some((10 - sum % 10) % 10)
}

/// Whether a string is a well-formed, correctly checksummed ISBN-13.
pub fn is_valid_isbn13(candidate: &str) -> bool {
    if candidate.len() != 13 || !candidate.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let expected = match check_digit(&candidate[..12]) {
        Some(digit) => digit,
        None => return false,
    };
    let actual = u32::from(candidate.as_bytes()[12] - b'0');

    expected == actual
}

/// Append the correct check digit to twelve leading digits.
///
/// Test support for building known-valid ISBNs; returns `None` for
/// malformed input.
pub fn with_check_digit(first_twelve: &str) -> Option<String> {
    check_digit(first_twelve).map(|digit| format!("{}{}", first_twelve, digit))
}

/// Validates the ISBN column of a mapped record.
#[derive(Debug, Clone)]
pub struct IsbnValidator {
    column: String,
}

impl IsbnValidator {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl FieldValidator for IsbnValidator {
    fn validate(&self, record: &MappedRecord) -> Vec<FieldFinding> {
        let value = match record.value(&self.column) {
            Some(value) if !value.is_empty() => value,
            // An unassigned ISBN is not this validator's concern.
            _ => return Vec::new(),
        };

        if value.len() != 13 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return vec![FieldFinding::error(
                self.column.clone(),
                format!("ISBN must be exactly 13 digits, got '{}'", value),
            )];
        }

        if !is_valid_isbn13(value) {
            let corrected = with_check_digit(&value[..12]);
            let mut finding = FieldFinding::error(
                self.column.clone(),
                format!("ISBN '{}' fails its checksum", value),
            );
            if let Some(corrected) = corrected {
                finding = finding.with_suggestions(vec![corrected]);
            }
            return vec![finding];
        }

        Vec::new()
    }
}

#[cfg(test)]
#[path = "isbn_tests.rs"]
mod tests;
