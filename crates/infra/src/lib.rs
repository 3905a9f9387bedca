//! # Daysheet Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with retry and timeout handling
//! - Jira and GitHub activity fetchers
//! - Chat-completions summarizer (Groq, OpenAI, Azure OpenAI)
//! - JSON file log cache
//! - Configuration loading from files and the environment
//!
//! ## Architecture
//! - Implements traits defined in `daysheet-core`
//! - Contains all "impure" code (network and file I/O)

pub mod cache;
pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use cache::JsonLogCache;
pub use http::{HttpClient, RetryPolicy};
pub use integrations::github::GithubClient;
pub use integrations::jira::JiraClient;
pub use integrations::llm::{ChatCompletionsClient, ComposedRemarkSummarizer};
