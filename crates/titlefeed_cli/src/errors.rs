use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the TitleFeed CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Failed to load a file from the filesystem.
    #[error("Failed to load {path}: {source}")]
    LoadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Failed to parse the TOML CLI configuration file.
    #[error("Failed to parse TOML configuration file: {0}")]
    ParseTomlFile(#[from] toml::de::Error),

    /// Failed to parse a JSON input file (books manifest).
    #[error("Failed to parse {path}: {source}")]
    ParseJsonFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The distributor schema header was unusable.
    #[error("Invalid column schema: {0}")]
    Schema(#[from] feed_model::SchemaError),

    /// Layered configuration failed to load or resolve.
    #[error(transparent)]
    Configuration(#[from] config_manager::ConfigurationError),

    /// Validation rule data failed to load.
    #[error(transparent)]
    RuleLoad(#[from] validation::RuleLoadError),

    /// The completion client could not be constructed.
    #[error("Completion client setup failed: {0}")]
    Completer(#[from] llm_client::Error),

    /// The batch itself failed.
    #[error(transparent)]
    Batch(#[from] titlefeed_core::BatchError),

    /// Failed to write an output file.
    #[error("Failed to write {path}: {source}")]
    WriteOutput {
        path: String,
        #[source]
        source: io::Error,
    },
}
