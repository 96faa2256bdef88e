//! The distributor's fixed column schema.
//!
//! The distributor publishes a submission template whose header row names
//! every column in a fixed order. Output rows must carry exactly these
//! columns in exactly this order - columns are never added, dropped or
//! reordered, and unmapped columns are emitted as empty strings.

use thiserror::Error;

/// Errors raised while constructing a column schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Column schema is empty")]
    Empty,

    #[error("Duplicate column name in schema: {column}")]
    DuplicateColumn { column: String },
}

/// Ordered list of distributor column names.
///
/// Constructed once per run from the distributor's template header row and
/// shared read-only across mapping, validation and emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    /// Build a schema from an ordered list of column names.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Empty` for an empty list and
    /// `SchemaError::DuplicateColumn` when a name repeats - a duplicated
    /// header would make registry lookups ambiguous.
    pub fn new<I, S>(columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }
        for (index, column) in columns.iter().enumerate() {
            if columns[..index].contains(column) {
                return Err(SchemaError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Parse a schema from a template header line (comma separated).
    ///
    /// Header templates ship without quoting; each cell is trimmed.
    pub fn from_header_line(line: &str) -> Result<Self, SchemaError> {
        Self::new(line.split(',').map(|cell| cell.trim().to_string()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Zero-based position of a column, if present.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// The header row, in emission order.
    pub fn header(&self) -> &[String] {
        &self.columns
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
