//! Wire models for the chat-style completion endpoint.

use serde::{Deserialize, Serialize};

/// One prompt message in the request body.
#[derive(Debug, Clone, Serialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

/// Request body sent to the completion endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequestBody {
    pub model: String,
    pub messages: Vec<PromptMessage>,
}

/// One returned choice.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub message: ChoiceMessage,
}

impl CompletionChoice {
    /// The choice's text content.
    pub fn text(&self) -> &str {
        &self.message.content
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

/// Response body returned by the completion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponseBody {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}
