//! Feed emission error types.

use thiserror::Error;

/// Errors raised while serializing the feed.
///
/// A `ColumnCountMismatch` is fatal for that record only - the emitter
/// skips it and carries on with the rest of the batch.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error(
        "Record {record_index} has {actual} mapped fields but the header has {expected} columns"
    )]
    ColumnCountMismatch {
        record_index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Emitted CSV was not valid UTF-8")]
    InvalidUtf8,
}
