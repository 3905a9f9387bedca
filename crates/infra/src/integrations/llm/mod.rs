//! LLM remark summarization
//!
//! All supported providers speak the OpenAI chat-completions protocol, so a
//! single client covers them; only the endpoint and auth header differ:
//!
//! | Provider | Endpoint | Auth |
//! |----------|----------|------|
//! | Groq     | `https://api.groq.com/openai/v1/chat/completions` | Bearer |
//! | OpenAI   | `https://api.openai.com/v1/chat/completions` | Bearer |
//! | Azure    | `{endpoint}/openai/deployments/{deployment}/chat/completions` | `api-key` |
//!
//! When summarization is disabled, [`ComposedRemarkSummarizer`] produces the
//! locally composed remark instead.

pub mod client;
pub mod local;
pub mod types;

pub use client::ChatCompletionsClient;
pub use local::ComposedRemarkSummarizer;
pub use types::LlmError;
