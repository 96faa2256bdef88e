//! Crate for delegating metadata field completion to an LLM API.
//!
//! The field mapper treats text completion as an untrusted external
//! collaborator: it may fail, time out, or return malformed text, and the
//! caller degrades to a fallback value rather than failing the record.
//! This crate owns that boundary - the [`FieldCompleter`] trait plus an
//! HTTP implementation for a chat-style completion endpoint.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub mod errors;
pub use errors::Error;

pub mod models;
use models::{CompletionChoice, CompletionRequestBody, CompletionResponseBody, PromptMessage};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Default bound on one completion request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One field-completion request.
///
/// Carries the target output column, the rendered prompt, and the
/// metadata context pairs the completer may fold into its own prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Output column the completion is for, e.g. "Contributor One Bio".
    pub field_name: String,
    /// Rendered prompt text.
    pub prompt: String,
    /// Book context as display-name/value pairs, e.g. ("title", ...).
    pub context: BTreeMap<String, String>,
}

impl CompletionRequest {
    pub fn new(field_name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            prompt: prompt.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Service boundary for LLM-backed field completion.
///
/// Implementations must be cheap to share across a batch; the mapping
/// registry holds one behind an `Arc` for the lifetime of a run.
#[async_trait]
pub trait FieldCompleter: Send + Sync {
    /// Produce a best-effort textual value for one missing field.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on timeout, transport failure, non-success
    /// HTTP status, or a malformed response payload. Callers decide
    /// whether to retry via [`Error::is_transient`].
    async fn complete_field(&self, request: &CompletionRequest) -> Result<String, Error>;
}

/// A completer for runs without a configured completion endpoint.
///
/// Always reports `Error::Disabled`, which is not transient, so the
/// mapping layer falls straight through to the configured fallback.
#[derive(Debug, Clone, Default)]
pub struct DisabledFieldCompleter;

#[async_trait]
impl FieldCompleter for DisabledFieldCompleter {
    async fn complete_field(&self, request: &CompletionRequest) -> Result<String, Error> {
        debug!(
            field = %request.field_name,
            "Completion requested but no completion endpoint is configured"
        );
        Err(Error::Disabled)
    }
}

/// A client for a chat-style HTTP completion endpoint.
#[derive(Debug, Clone)]
pub struct HttpFieldCompleter {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl HttpFieldCompleter {
    /// Create a completer for the given endpoint and model.
    ///
    /// `api_key`, when present, is sent as a bearer token. The timeout
    /// bounds the whole request including connection setup.
    ///
    /// # Errors
    ///
    /// Returns `Error::ClientConstruction` if the underlying HTTP client
    /// cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().timeout(timeout);

        if let Some(key) = api_key {
            let mut headers = reqwest::header::HeaderMap::new();
            let mut value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| Error::ClientConstruction {
                    reason: format!("invalid API key header: {}", e),
                })?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|e| Error::ClientConstruction {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    /// Fold the request context into the user prompt.
    fn render_prompt(request: &CompletionRequest) -> String {
        if request.context.is_empty() {
            return request.prompt.clone();
        }

        let mut prompt = request.prompt.clone();
        prompt.push_str("\n\nBook context:\n");
        for (key, value) in &request.context {
            prompt.push_str(&format!("- {}: {}\n", key, value));
        }
        prompt
    }
}

#[async_trait]
impl FieldCompleter for HttpFieldCompleter {
    #[instrument(skip(self, request), fields(field = %request.field_name))]
    async fn complete_field(&self, request: &CompletionRequest) -> Result<String, Error> {
        let body = CompletionRequestBody {
            model: self.model.clone(),
            messages: vec![PromptMessage {
                role: "user".to_string(),
                content: Self::render_prompt(request),
            }],
        };

        info!(
            field = %request.field_name,
            model = %self.model,
            "Requesting field completion"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(Error::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                field = %request.field_name,
                status = status.as_u16(),
                "Completion endpoint returned non-success status"
            );
            return Err(Error::HttpStatus {
                status: status.as_u16(),
            });
        }

        let payload: CompletionResponseBody =
            response.json().await.map_err(|_| Error::InvalidResponse)?;

        let text = payload
            .choices
            .first()
            .map(CompletionChoice::text)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(Error::InvalidResponse)?;

        debug!(
            field = %request.field_name,
            length = text.len(),
            "Completion received"
        );

        Ok(text.to_string())
    }
}
