//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Task tiers
pub const TIER_0_STATUSES: [&str; 3] = ["done", "closed", "resolved"];
pub const TIER_1_STATUS: &str = "in progress";

// Remarks
pub const NO_ACTIVITY_REMARK: &str = "No significant activity";
pub const MAX_REMARK_COMMITS: usize = 10;
pub const MAX_RAW_REMARK_LENGTH: usize = 400;
pub const TRUNCATE_SUFFIX: &str = "...";

// Log cache layout
pub const DAILY_LOG_PREFIX: &str = "activity_";
pub const DAILY_LOG_EXTENSION: &str = "json";
pub const DEFAULT_LOGS_DIR: &str = "logs";

// Insights
pub const CONTEXT_SWITCH_THRESHOLD: usize = 2;

// Report defaults
pub const DEFAULT_REPORT_DAYS: u32 = 5;
pub const DEFAULT_MAX_RANGE_DAYS: u32 = 62;
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

// Summarizer defaults
pub const DEFAULT_LLM_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 150;
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.3;

// Source defaults
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_JIRA_MAX_RESULTS: u32 = 50;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_MAX_ATTEMPTS: usize = 3;
pub const HTTP_RETRY_BACKOFF_MS: u64 = 250;
