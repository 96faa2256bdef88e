//! Configuration for the TitleFeed CLI.
//!
//! The CLI's own settings (as opposed to the publishing configuration
//! layers) live in a small TOML file: where the completion endpoint is,
//! which model to use, and how long a completion request may take.
//! The API key itself never lives in the file - only the name of the
//! environment variable that holds it.

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "titlefeed.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// CLI application configuration.
///
/// # Example TOML Configuration
///
/// ```toml
/// [completion]
/// endpoint = "https://api.example.com/v1/chat/completions"
/// model = "gpt-4o-mini"
/// api_key_env = "TITLEFEED_COMPLETION_KEY"
/// timeout_secs = 30
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Completion service settings; absent means completion is disabled.
    #[serde(default)]
    pub completion: Option<CompletionConfig>,
}

/// Settings for the external completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the bearer token.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Bound on one completion request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl CompletionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key from the configured environment variable, if any.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).map_err(|source| Error::LoadFile {
            path: path.display().to_string(),
            source,
        })?;

        let config: AppConfig = toml::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded CLI configuration");
        Ok(config)
    }

    /// Load from the default location, or fall back to defaults when no
    /// file exists (completion disabled).
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILENAME);
                if default.exists() {
                    Self::load_from_file(default)
                } else {
                    debug!("No CLI configuration file; completion disabled");
                    Ok(Self::default())
                }
            }
        }
    }
}
