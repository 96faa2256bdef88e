//! Completion client error types.

use thiserror::Error;

/// Errors from the completion boundary.
///
/// The mapping layer never lets one of these fail a record - it consults
/// [`Error::is_transient`] to decide on its single retry, then degrades
/// to the strategy's fallback value.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Completion request timed out")]
    Timeout,

    #[error("Completion endpoint returned HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Completion response was malformed or empty")]
    InvalidResponse,

    #[error("No completion endpoint is configured")]
    Disabled,

    #[error("Failed to construct completion client: {reason}")]
    ClientConstruction { reason: String },
}

impl Error {
    /// Classify a reqwest failure, surfacing timeouts distinctly.
    pub(crate) fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(error)
        }
    }

    /// Whether a retry could plausibly succeed.
    ///
    /// Timeouts, transport failures and server-side statuses are
    /// transient; a malformed response, a client-side status or a
    /// disabled completer is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::Request(_) => true,
            Self::HttpStatus { status } => *status >= 500 || *status == 429,
            Self::InvalidResponse | Self::Disabled | Self::ClientConstruction { .. } => false,
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
