//! Mapped records produced by the field mapper.
//!
//! A `MappedRecord` is the pipeline's intermediate product: one string
//! value per schema column, in schema order, each tagged with the origin
//! that produced it. Origins feed the completion report, which tells the
//! operator which columns came from real metadata and which were filled by
//! defaults or generated text.

use serde::{Deserialize, Serialize};

/// Which part of the mapping layer produced a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrigin {
    /// Copied from a metadata attribute.
    Direct,
    /// Derived from one or more metadata attributes.
    Computed,
    /// Chosen by a conditional rule on another attribute.
    Conditional,
    /// Static fallback registered for the column.
    Default,
    /// Produced by the completion service (or its cache / fallback).
    LlmCompletion,
    /// No strategy registered; the column was emitted empty.
    Unregistered,
    /// Replaced or extended by a configuration `field_overrides` entry.
    ConfigOverride,
    /// Forced empty by a configuration `blank_fields` entry.
    ForcedBlank,
}

impl std::fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Direct => "direct",
            Self::Computed => "computed",
            Self::Conditional => "conditional",
            Self::Default => "default",
            Self::LlmCompletion => "llm-completion",
            Self::Unregistered => "unregistered",
            Self::ConfigOverride => "config-override",
            Self::ForcedBlank => "forced-blank",
        };
        write!(f, "{}", name)
    }
}

/// One mapped output cell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MappedField {
    /// Distributor column name.
    pub column: String,
    /// Final string value. Never absent - missing data maps to "".
    pub value: String,
    pub origin: ValueOrigin,
}

impl MappedField {
    pub fn new(column: impl Into<String>, value: impl Into<String>, origin: ValueOrigin) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            origin,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// One book's mapped output row, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct MappedRecord {
    fields: Vec<MappedField>,
}

impl MappedRecord {
    pub fn new(fields: Vec<MappedField>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[MappedField] {
        &self.fields
    }

    /// Value for a column, if the column exists in this record.
    pub fn value(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.value.as_str())
    }

    /// Origin for a column, if the column exists in this record.
    pub fn origin(&self, column: &str) -> Option<ValueOrigin> {
        self.fields
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.origin)
    }

    /// Replace a column's value in place, keeping its origin.
    ///
    /// Used by the validation pipeline to apply corrections such as
    /// word-boundary truncation. Returns false when the column is absent.
    pub fn set_value(&mut self, column: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.column == column) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// The row values in schema order, for CSV emission.
    pub fn values(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.value.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
