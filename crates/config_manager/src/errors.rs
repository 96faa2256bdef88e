//! Configuration system error types.
//!
//! Domain-specific errors for configuration loading, parsing, and
//! hierarchy resolution. Configuration errors are fatal for the whole
//! batch: nothing downstream can be trusted if the layer stack is
//! malformed, so these surface before any record is processed.

use thiserror::Error;

/// Configuration system errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to access configuration file: {path} - {reason}")]
    FileAccessError { path: String, reason: String },

    #[error("Failed to parse configuration: {path} - {reason}")]
    ParseError { path: String, reason: String },

    #[error("Malformed {layer} layer: key '{key_path}' - {reason}")]
    MalformedLayer {
        layer: String,
        key_path: String,
        reason: String,
    },

    #[error("Configuration hierarchy resolution failed: {reason}")]
    HierarchyResolutionFailed { reason: String },
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
