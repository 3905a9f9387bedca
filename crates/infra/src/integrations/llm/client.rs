//! Chat-completions client implementing the summarizer port

use async_trait::async_trait;
use daysheet_core::timesheet::remark::build_prompt;
use daysheet_core::Summarizer;
use daysheet_domain::{DaysheetError, LlmConfig, LlmProvider, RemarkInput, Result};
use reqwest::Method;
use tracing::{debug, info};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, LlmError};
use crate::http::HttpClient;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";
const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes work activity for timesheets.";

#[derive(Debug, Clone)]
enum Credential {
    Bearer(String),
    ApiKeyHeader(String),
}

/// Client for an OpenAI-compatible chat-completions endpoint
pub struct ChatCompletionsClient {
    http_client: HttpClient,
    api_url: String,
    credential: Credential,
    model: Option<String>,
    max_tokens: u32,
    temperature: f32,
}

impl ChatCompletionsClient {
    /// Build a client for the provider named in `config`.
    ///
    /// # Errors
    /// Returns `DaysheetError::Config` when the provider is disabled or a
    /// setting it needs is missing.
    pub fn from_config(config: &LlmConfig, http_client: HttpClient) -> Result<Self> {
        let missing = config.missing_settings();
        if !missing.is_empty() {
            return Err(DaysheetError::Config(format!(
                "Missing LLM settings for provider '{}': {}",
                config.provider,
                missing.join(", ")
            )));
        }
        let api_key = config.api_key.clone().unwrap_or_default();

        let (api_url, credential, model) = match config.provider {
            LlmProvider::Disabled => {
                return Err(DaysheetError::Config("LLM summarization is disabled".into()));
            }
            LlmProvider::Groq => {
                (GROQ_API_URL.to_string(), Credential::Bearer(api_key), Some(config.model.clone()))
            }
            LlmProvider::OpenAi => (
                OPENAI_API_URL.to_string(),
                Credential::Bearer(api_key),
                Some(config.model.clone()),
            ),
            LlmProvider::Azure => {
                let endpoint = config.endpoint.as_deref().unwrap_or_default().trim_end_matches('/');
                let deployment = config.deployment.as_deref().unwrap_or_default();
                let version = config.api_version.as_deref().unwrap_or(DEFAULT_AZURE_API_VERSION);
                (
                    format!(
                        "{endpoint}/openai/deployments/{deployment}/chat/completions\
                         ?api-version={version}"
                    ),
                    Credential::ApiKeyHeader(api_key),
                    None,
                )
            }
        };

        Ok(Self {
            http_client,
            api_url,
            credential,
            model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Create a new client with custom API URL (for testing)
    #[cfg(test)]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Ask the model for a one-paragraph remark.
    ///
    /// # Errors
    /// Returns `LlmError` for network failures, API errors, or a response
    /// without text.
    pub async fn complete(&self, prompt: String) -> std::result::Result<String, LlmError> {
        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user", content: prompt },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let request = self.http_client.request(Method::POST, &self.api_url).json(&payload);
        let request = match &self.credential {
            Credential::Bearer(key) => request.bearer_auth(key),
            Credential::ApiKeyHeader(key) => request.header("api-key", key),
        };

        let response = self
            .http_client
            .send(request)
            .await
            .map_err(|err| LlmError::Network(err.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Received chat-completions response");
        if !status.is_success() {
            return Err(handle_error_status(status.as_u16(), response).await);
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidSchema(format!("Failed to parse response: {e}")))?;

        if let Some(usage) = &body.usage {
            debug!(tokens = usage.total_tokens, "Chat-completions token usage");
        }

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| LlmError::InvalidSchema("Response contained no message text".into()))
    }
}

async fn handle_error_status(status: u16, response: reqwest::Response) -> LlmError {
    let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

    match status {
        401 | 403 => LlmError::Authentication(format!("Invalid API key ({status})")),
        429 => LlmError::RateLimit(
            60, // Providers do not always send retry-after
        ),
        _ => LlmError::Api { status, message },
    }
}

#[async_trait]
impl Summarizer for ChatCompletionsClient {
    async fn summarize(&self, input: &RemarkInput) -> Result<String> {
        let remark = self.complete(build_prompt(input)).await?;
        info!(date = %input.date, chars = remark.chars().count(), "Generated remark");
        Ok(remark)
    }
}
