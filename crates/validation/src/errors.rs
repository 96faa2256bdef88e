//! Validation rule-set loading errors.
//!
//! Rule data (code lists) loads once at process start; a missing or
//! unreadable list is fatal for the batch, unlike per-record validation
//! findings which are collected and reported.

use thiserror::Error;

/// Errors raised while loading validation rule data.
#[derive(Error, Debug)]
pub enum RuleLoadError {
    #[error("Code list not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read code list: {path} - {reason}")]
    ReadError { path: String, reason: String },

    #[error("Code list is empty: {path}")]
    EmptyList { path: String },
}

/// Result type alias for rule loading.
pub type RuleLoadResult<T> = Result<T, RuleLoadError>;
