//! Validation findings and the aggregated report.

/// Severity of one finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The record violates a distributor rule.
    Error,
    /// The record was corrected or deserves operator attention.
    Warning,
}

/// One field-level validation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFinding {
    /// Distributor column the finding is about.
    pub column: String,
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Suggested corrections, where the validator can offer them.
    pub suggestions: Vec<String>,
    /// Replacement value the pipeline should apply to the record.
    pub corrected_value: Option<String>,
}

impl FieldFinding {
    /// An error finding with no suggestions.
    pub fn error(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            severity: Severity::Error,
            message: message.into(),
            suggestions: Vec::new(),
            corrected_value: None,
        }
    }

    /// A warning finding with no suggestions.
    pub fn warning(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            severity: Severity::Warning,
            message: message.into(),
            suggestions: Vec::new(),
            corrected_value: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_correction(mut self, value: impl Into<String>) -> Self {
        self.corrected_value = Some(value.into());
        self
    }
}

/// Aggregated result of one validation pass over one record.
///
/// Created fresh per run and discarded after report emission - nothing
/// here persists between records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    findings: Vec<FieldFinding>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, finding: FieldFinding) {
        self.findings.push(finding);
    }

    pub fn extend(&mut self, findings: Vec<FieldFinding>) {
        self.findings.extend(findings);
    }

    /// True only if every validator passed (warnings allowed).
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    pub fn findings(&self) -> &[FieldFinding] {
        &self.findings
    }

    /// Status line used by the completion report, e.g. "2 errors, 1 warning".
    pub fn status_line(&self) -> String {
        if self.findings.is_empty() {
            return "clean".to_string();
        }

        let errors = self.error_count();
        let warnings = self.warning_count();
        let plural = |count: usize, word: &str| {
            if count == 1 {
                format!("1 {}", word)
            } else {
                format!("{} {}s", count, word)
            }
        };

        match (errors, warnings) {
            (0, w) => plural(w, "warning"),
            (e, 0) => plural(e, "error"),
            (e, w) => format!("{}, {}", plural(e, "error"), plural(w, "warning")),
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
