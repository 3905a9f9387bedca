/// Chat-completions wire types and the LLM error enum
use daysheet_domain::DaysheetError;
use serde::{Deserialize, Serialize};

/// Errors returned by the chat-completions client
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Network-level error (connection failed, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// The provider returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded (retry after {0}s)")]
    RateLimit(u64),

    /// Authentication failed (invalid API key)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Response body doesn't match the expected shape
    #[error("Invalid response schema: {0}")]
    InvalidSchema(String),
}

impl From<LlmError> for DaysheetError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Authentication(msg) => DaysheetError::Auth(format!("LLM provider: {msg}")),
            other => DaysheetError::Summarization(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest {
    /// Azure routes by deployment and ignores the model field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: Message,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Usage {
    pub total_tokens: u32,
}
