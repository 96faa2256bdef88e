//! Subject code membership validation (BISAC, Thema).
//!
//! Valid codes load once at process start from one-code-per-line list
//! files and are held as an in-memory set for O(1) membership checks.
//! Unknown codes report the closest valid codes as suggestions rather
//! than a free-form message: prefix matches first, then edit distance.

use crate::errors::{RuleLoadError, RuleLoadResult};
use crate::pipeline::FieldValidator;
use crate::report::FieldFinding;
use feed_model::MappedRecord;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Maximum suggestions attached to an unknown-code finding.
const MAX_SUGGESTIONS: usize = 3;

/// An immutable set of valid subject codes for one scheme.
#[derive(Debug, Clone)]
pub struct CodeSet {
    scheme: String,
    codes: HashSet<String>,
}

impl CodeSet {
    /// Build a set from already-loaded codes.
    pub fn new(scheme: impl Into<String>, codes: impl IntoIterator<Item = String>) -> Self {
        Self {
            scheme: scheme.into(),
            codes: codes.into_iter().collect(),
        }
    }

    /// Load a set from a one-code-per-line list file.
    ///
    /// Blank lines and `#` comment lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleLoadError`] for a missing, unreadable or empty
    /// list - rule data is loaded before the batch starts and a bad list
    /// is fatal.
    pub fn load(scheme: impl Into<String>, path: &Path) -> RuleLoadResult<Self> {
        if !path.exists() {
            return Err(RuleLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|e| RuleLoadError::ReadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let codes: HashSet<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        if codes.is_empty() {
            return Err(RuleLoadError::EmptyList {
                path: path.display().to_string(),
            });
        }

        let scheme = scheme.into();
        info!(
            scheme = %scheme,
            codes = codes.len(),
            path = %path.display(),
            "Loaded subject code list"
        );

        Ok(Self { scheme, codes })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Closest valid codes for an unknown one.
    ///
    /// Codes sharing the longest prefix rank first; edit distance breaks
    /// the remaining ties. Deterministic for a given set.
    pub fn suggestions_for(&self, unknown: &str) -> Vec<String> {
        let mut ranked: Vec<(usize, usize, &String)> = self
            .codes
            .iter()
            .map(|code| {
                let prefix = common_prefix_len(unknown, code);
                let distance = edit_distance(unknown, code);
                (prefix, distance, code)
            })
            .collect();

        // Longest shared prefix first, then smallest edit distance,
        // then lexical order to keep output stable.
        ranked.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then(a.1.cmp(&b.1))
                .then(a.2.cmp(b.2))
        });

        ranked
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, _, code)| code.clone())
            .collect()
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

/// Levenshtein distance over bytes; subject codes are ASCII.
fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.as_bytes();
    let b = b.as_bytes();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Validates one subject-code column against a code set.
#[derive(Debug, Clone)]
pub struct CodeListValidator {
    column: String,
    codes: Arc<CodeSet>,
}

impl CodeListValidator {
    pub fn new(column: impl Into<String>, codes: Arc<CodeSet>) -> Self {
        Self {
            column: column.into(),
            codes,
        }
    }
}

impl FieldValidator for CodeListValidator {
    fn validate(&self, record: &MappedRecord) -> Vec<FieldFinding> {
        let value = match record.value(&self.column) {
            Some(value) if !value.is_empty() => value,
            _ => return Vec::new(),
        };

        if self.codes.contains(value) {
            return Vec::new();
        }

        vec![FieldFinding::error(
            self.column.clone(),
            format!(
                "'{}' is not a valid {} code",
                value,
                self.codes.scheme()
            ),
        )
        .with_suggestions(self.codes.suggestions_for(value))]
    }
}

#[cfg(test)]
#[path = "codes_tests.rs"]
mod tests;
