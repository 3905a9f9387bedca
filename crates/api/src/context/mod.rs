//! Application context - dependency injection container

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use daysheet_core::{InsightsService, LogCache, Summarizer, TimesheetService};
use daysheet_domain::{Config, LlmConfig, LlmProvider, Result};
use daysheet_infra::{
    config, ChatCompletionsClient, ComposedRemarkSummarizer, GithubClient, HttpClient,
    JiraClient, JsonLogCache,
};
use tracing::{info, warn};

/// Application context - holds the configuration and shared services
///
/// Network clients are only built when a command needs them, so commands
/// that read the cache work without credentials.
pub struct AppContext {
    pub config: Config,
    pub log_cache: Arc<dyn LogCache>,
    pub insights: InsightsService,
    today: Option<NaiveDate>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let log_cache: Arc<dyn LogCache> = Arc::new(JsonLogCache::new(&config.cache.logs_dir));
        let insights = InsightsService::new(Arc::clone(&log_cache));
        info!(logs_dir = %config.cache.logs_dir.display(), "Application context ready");
        Self { config, log_cache, insights, today: None }
    }

    /// Load configuration and build the context.
    ///
    /// An explicit `config_path` is read as-is (with environment overrides
    /// on top); otherwise the loader's env-then-file strategy applies.
    ///
    /// # Errors
    /// Returns `DaysheetError::Config` when the file is missing or invalid.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => config::apply_env_overrides(config::load_from_file(Some(path))?)?,
            None => config::load()?,
        };
        Ok(Self::new(config))
    }

    /// Pin the current date (tests and reproducible runs).
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Build the timesheet service with live Jira, GitHub, and LLM clients.
    ///
    /// # Errors
    /// Returns `DaysheetError::Config` listing every missing credential.
    pub fn timesheet_service(&self) -> Result<TimesheetService> {
        self.config.validate_for_fetch()?;

        let http = HttpClient::from_config(&self.config.http)?;
        let jira = JiraClient::from_config(&self.config.jira, http.clone())?;
        let github = GithubClient::from_config(&self.config.github, http.clone())?;
        let summarizer = build_summarizer(&self.config.llm, http)?;

        let service = TimesheetService::new(
            Arc::new(jira),
            Arc::new(github),
            Arc::clone(&self.log_cache),
            summarizer,
        )
        .with_employee(self.config.employee.clone())
        .with_lookback_days(self.config.report.carry_forward_lookback_days)
        .with_max_range_days(self.config.report.max_range_days);

        Ok(match self.today {
            Some(today) => service.with_today(today),
            None => service,
        })
    }
}

/// Pick the summarizer for the configured provider.
///
/// Incomplete provider settings downgrade to locally composed remarks
/// instead of failing the run.
fn build_summarizer(config: &LlmConfig, http: HttpClient) -> Result<Arc<dyn Summarizer>> {
    if config.provider == LlmProvider::Disabled {
        info!("LLM summarization disabled; remarks are composed locally");
        return Ok(Arc::new(ComposedRemarkSummarizer));
    }

    let missing = config.missing_settings();
    if !missing.is_empty() {
        warn!(
            provider = %config.provider,
            missing = ?missing,
            "LLM settings incomplete; remarks are composed locally"
        );
        return Ok(Arc::new(ComposedRemarkSummarizer));
    }

    info!(provider = %config.provider, model = %config.model, "Using LLM summarizer");
    Ok(Arc::new(ChatCompletionsClient::from_config(config, http)?))
}

#[cfg(test)]
mod tests {
    use daysheet_domain::DaysheetError;

    use super::*;

    #[test]
    fn timesheet_service_requires_credentials() {
        let ctx = AppContext::new(Config::default());
        match ctx.timesheet_service() {
            Err(DaysheetError::Config(msg)) => {
                assert!(msg.contains("JIRA_URL"));
                assert!(msg.contains("GITHUB_TOKEN"));
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("expected a config error"),
        }
    }

    #[test]
    fn missing_llm_key_does_not_block_the_service() {
        let mut config = Config::default();
        config.jira.base_url = Some("https://acme.atlassian.net".into());
        config.jira.email = Some("dev@acme.io".into());
        config.jira.api_token = Some("token".into());
        config.jira.project_key = Some("PAY".into());
        config.github.token = Some("gh".into());
        config.github.username = Some("dev".into());
        config.llm.api_key = None;

        let ctx = AppContext::new(config);
        assert!(ctx.timesheet_service().is_ok());
    }

    #[test]
    fn pinned_today_is_used() {
        let day = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let ctx = AppContext::new(Config::default()).with_today(day);
        assert_eq!(ctx.today(), day);
    }
}
