//! Batch-level error types.
//!
//! Only batch-fatal failures surface here. Per-field mapping failures
//! are absorbed as fallback values, and per-record validation and
//! emission failures are collected into the completion report.

use thiserror::Error;

/// Errors that abort a whole batch.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Configuration(#[from] config_manager::ConfigurationError),

    #[error("Feed serialization failed: {0}")]
    Emission(#[from] feed_emitter::EmitError),
}

/// Result type alias for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;
