//! Configuration management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GITHUB_API_URL, DEFAULT_HTTP_MAX_ATTEMPTS, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_JIRA_MAX_RESULTS, DEFAULT_LLM_MAX_TOKENS, DEFAULT_LLM_MODEL, DEFAULT_LLM_TEMPERATURE,
    DEFAULT_LOGS_DIR, DEFAULT_LOOKBACK_DAYS, DEFAULT_MAX_RANGE_DAYS, DEFAULT_REPORT_DAYS,
};
use crate::errors::{DaysheetError, Result};
use crate::impl_domain_status_conversions;

/// Application configuration
///
/// Loaded once at startup and handed to each component at construction.
/// Every section has defaults; only credentials must be supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub jira: JiraConfig,
    pub github: GithubConfig,
    pub llm: LlmConfig,
    pub cache: CacheConfig,
    pub employee: EmployeeProfile,
    pub report: ReportConfig,
    pub http: HttpConfig,
}

/// Jira Cloud connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    pub base_url: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub project_key: Option<String>,
    pub fetch_worklogs: bool,
    /// Upper bound on issues fetched per day
    pub max_results: u32,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            email: None,
            api_token: None,
            project_key: None,
            fetch_worklogs: false,
            max_results: DEFAULT_JIRA_MAX_RESULTS,
        }
    }
}

/// GitHub connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub username: Option<String>,
    pub api_url: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self { token: None, username: None, api_url: DEFAULT_GITHUB_API_URL.to_string() }
    }
}

/// Chat-completions provider used for remarks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    #[default]
    Groq,
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
    /// Never call a model; remarks are composed locally.
    Disabled,
}

impl_domain_status_conversions!(LlmProvider {
    Groq => "groq",
    OpenAi => "openai",
    Azure => "azure",
    Disabled => "disabled",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    /// Azure resource endpoint, e.g. `https://acme.openai.azure.com`
    pub endpoint: Option<String>,
    pub api_version: Option<String>,
    pub deployment: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmConfig {
    /// Settings the configured provider needs but does not have.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match self.provider {
            LlmProvider::Disabled => {}
            LlmProvider::Groq | LlmProvider::OpenAi => {
                if self.api_key.is_none() {
                    missing.push("api_key");
                }
            }
            LlmProvider::Azure => {
                if self.api_key.is_none() {
                    missing.push("api_key");
                }
                if self.endpoint.is_none() {
                    missing.push("endpoint");
                }
                if self.deployment.is_none() {
                    missing.push("deployment");
                }
            }
        }
        missing
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            api_key: None,
            model: DEFAULT_LLM_MODEL.to_string(),
            endpoint: None,
            api_version: None,
            deployment: None,
            max_tokens: DEFAULT_LLM_MAX_TOKENS,
            temperature: DEFAULT_LLM_TEMPERATURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub logs_dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { logs_dir: PathBuf::from(DEFAULT_LOGS_DIR) }
    }
}

/// User-supplied metadata copied onto every timesheet row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeProfile {
    pub employee_id: String,
    pub employee_name: String,
    pub billable: bool,
    pub role: String,
    pub site: String,
    pub authorized_hours: f32,
}

impl Default for EmployeeProfile {
    fn default() -> Self {
        Self {
            employee_id: String::new(),
            employee_name: String::new(),
            billable: true,
            role: "Developer".to_string(),
            site: "Offshore".to_string(),
            authorized_hours: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Days covered when no range is given, ending today
    pub default_days: u32,
    /// How far back carry-forward may scan for an in-progress task
    pub carry_forward_lookback_days: u32,
    pub max_range_days: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_REPORT_DAYS,
            carry_forward_lookback_days: DEFAULT_LOOKBACK_DAYS,
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_attempts: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS, max_attempts: DEFAULT_HTTP_MAX_ATTEMPTS }
    }
}

impl Config {
    /// Check that everything needed to fetch from both sources is present.
    ///
    /// Summarizer settings are not checked here: an unusable provider only
    /// downgrades remarks to the locally composed form.
    ///
    /// # Errors
    /// Returns `DaysheetError::Config` listing every missing setting.
    pub fn validate_for_fetch(&self) -> Result<()> {
        let mut missing = Vec::new();
        let checks = [
            ("JIRA_URL", &self.jira.base_url),
            ("JIRA_EMAIL", &self.jira.email),
            ("JIRA_API_TOKEN", &self.jira.api_token),
            ("JIRA_PROJECT_KEY", &self.jira.project_key),
            ("GITHUB_TOKEN", &self.github.token),
            ("GITHUB_USERNAME", &self.github.username),
        ];
        for (name, value) in checks {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                missing.push(name);
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DaysheetError::Config(format!("Missing settings: {}", missing.join(", "))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Config {
        let mut config = Config::default();
        config.jira.base_url = Some("https://acme.atlassian.net".into());
        config.jira.email = Some("dev@acme.io".into());
        config.jira.api_token = Some("jira-token".into());
        config.jira.project_key = Some("PROJ".into());
        config.github.token = Some("gh-token".into());
        config.github.username = Some("dev".into());
        config.llm.api_key = Some("groq-key".into());
        config
    }

    #[test]
    fn complete_config_validates() {
        assert!(complete().validate_for_fetch().is_ok());
    }

    #[test]
    fn validation_reports_every_missing_setting() {
        let mut config = complete();
        config.jira.api_token = None;
        config.github.username = Some("  ".into());

        let err = config.validate_for_fetch().unwrap_err();
        let DaysheetError::Config(message) = err else {
            panic!("expected config error");
        };
        assert!(message.contains("JIRA_API_TOKEN"));
        assert!(message.contains("GITHUB_USERNAME"));
    }

    #[test]
    fn llm_settings_do_not_block_fetching() {
        let mut config = complete();
        config.llm.api_key = None;
        assert!(config.validate_for_fetch().is_ok());
        assert_eq!(config.llm.missing_settings(), vec!["api_key"]);

        config.llm.provider = LlmProvider::Azure;
        assert_eq!(config.llm.missing_settings(), vec!["api_key", "endpoint", "deployment"]);

        config.llm.provider = LlmProvider::Disabled;
        assert!(config.llm.missing_settings().is_empty());
    }

    #[test]
    fn secrets_are_not_serialized() {
        let json = serde_json::to_value(complete()).unwrap();
        assert!(json["jira"].get("api_token").is_none());
        assert!(json["github"].get("token").is_none());
        assert_eq!(json["llm"]["provider"], "groq");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [jira]
            project_key = "PROJ"

            [llm]
            provider = "openai"
            "#,
        )
        .unwrap();
        assert_eq!(config.jira.max_results, DEFAULT_JIRA_MAX_RESULTS);
        assert_eq!(config.llm.provider, LlmProvider::OpenAi);
        assert_eq!(config.report.default_days, DEFAULT_REPORT_DAYS);
        assert_eq!(config.cache.logs_dir, PathBuf::from("logs"));
    }
}
