//! Jira Cloud client implementing the activity fetcher port

use async_trait::async_trait;
use chrono::NaiveDate;
use daysheet_core::ActivityFetcher;
use daysheet_domain::{
    flatten_adf, ActivityKind, ActivityRecord, ActivitySource, DaysheetError, JiraConfig, Result,
    Worklog,
};
use reqwest::Method;
use tracing::{debug, info, warn};

use super::types::{
    jira_local_date, parse_jira_timestamp, JiraIssue, SearchResponse, WorklogResponse,
};
use crate::http::HttpClient;
use crate::integrations::Captured;

const SEARCH_PATH: &str = "/rest/api/3/search/jql";
const SEARCH_FIELDS: &str = "summary,status,updated,description,assignee,project";
const MAX_PAGE_SIZE: u32 = 100;
const UNASSIGNED: &str = "Unassigned";

/// Jira REST client scoped to one project
pub struct JiraClient {
    http_client: HttpClient,
    base_url: String,
    email: String,
    api_token: String,
    project_key: String,
    fetch_worklogs: bool,
    max_results: u32,
}

impl JiraClient {
    /// Create a client for `project_key` on the Jira site at `base_url`.
    pub fn new(
        http_client: HttpClient,
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
        project_key: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            email: email.into(),
            api_token: api_token.into(),
            project_key: project_key.into(),
            fetch_worklogs: false,
            max_results: daysheet_domain::constants::DEFAULT_JIRA_MAX_RESULTS,
        }
    }

    /// Build a client from the `[jira]` configuration section.
    ///
    /// # Errors
    /// Returns `DaysheetError::Config` naming the first missing setting, or
    /// when the base URL is not an absolute URL.
    pub fn from_config(config: &JiraConfig, http_client: HttpClient) -> Result<Self> {
        let require = |value: &Option<String>, name: &str| {
            value
                .clone()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| DaysheetError::Config(format!("Missing Jira setting: {name}")))
        };
        let base_url = require(&config.base_url, "base_url")?;
        url::Url::parse(&base_url).map_err(|e| {
            DaysheetError::Config(format!("Invalid Jira base_url '{base_url}': {e}"))
        })?;

        Ok(Self::new(
            http_client,
            base_url,
            require(&config.email, "email")?,
            require(&config.api_token, "api_token")?,
            require(&config.project_key, "project_key")?,
        )
        .with_worklogs(config.fetch_worklogs)
        .with_max_results(config.max_results))
    }

    pub fn with_worklogs(mut self, enabled: bool) -> Self {
        self.fetch_worklogs = enabled;
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// JQL selecting the project's issues updated on `date`.
    pub fn jql_for(&self, date: NaiveDate) -> String {
        let next = date.succ_opt().unwrap_or(date);
        format!(
            "project = {} AND updated >= '{}' AND updated < '{}' ORDER BY updated DESC",
            self.project_key,
            date.format("%Y-%m-%d"),
            next.format("%Y-%m-%d")
        )
    }

    /// Search issues updated on `date`, following page tokens up to the
    /// configured maximum.
    pub async fn search_issues(&self, date: NaiveDate) -> Result<Vec<Captured<JiraIssue>>> {
        let jql = self.jql_for(date);
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        let mut issues: Vec<Captured<JiraIssue>> = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let remaining = self.max_results.saturating_sub(issues.len() as u32);
            if remaining == 0 {
                break;
            }

            let mut query = vec![
                ("jql", jql.clone()),
                ("fields", SEARCH_FIELDS.to_string()),
                ("maxResults", remaining.min(MAX_PAGE_SIZE).to_string()),
            ];
            if let Some(token) = &page_token {
                query.push(("nextPageToken", token.clone()));
            }

            let request = self
                .http_client
                .request(Method::GET, &url)
                .basic_auth(&self.email, Some(&self.api_token))
                .header("Accept", "application/json")
                .query(&query);
            let page: SearchResponse = self.http_client.send_json(request).await?;
            debug!(%date, page_size = page.issues.len(), "Received Jira search page");

            issues.extend(page.issues);
            match page.next_page_token {
                Some(token) if page.is_last != Some(true) => page_token = Some(token),
                _ => break,
            }
        }

        issues.truncate(self.max_results as usize);
        Ok(issues)
    }

    /// Worklogs on `issue_id` that started on `date`.
    pub async fn fetch_worklogs(&self, issue_id: &str, date: NaiveDate) -> Result<Vec<Worklog>> {
        let url = format!("{}/rest/api/3/issue/{}/worklog", self.base_url, issue_id);
        let request = self
            .http_client
            .request(Method::GET, &url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header("Accept", "application/json");
        let response: WorklogResponse = self.http_client.send_json(request).await?;

        Ok(response
            .worklogs
            .into_iter()
            .filter_map(|wl| {
                let started_date = wl.started.as_deref().and_then(jira_local_date)?;
                (started_date == date).then(|| Worklog {
                    author: wl
                        .author
                        .as_ref()
                        .and_then(|a| a.display_name.clone())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    author_email: wl.author.and_then(|a| a.email_address),
                    started_date,
                    time_spent_seconds: wl.time_spent_seconds,
                })
            })
            .collect())
    }

    fn to_record(&self, issue: &Captured<JiraIssue>, date: NaiveDate) -> ActivityRecord {
        let fields = &issue.fields;
        let project = fields
            .project
            .as_ref()
            .and_then(|p| p.name.clone().or_else(|| p.key.clone()))
            .unwrap_or_else(|| self.project_key.clone());
        let status = fields.status.as_ref().map(|s| s.name.clone());
        let assignee = fields
            .assignee
            .as_ref()
            .and_then(|a| a.display_name.clone())
            .unwrap_or_else(|| UNASSIGNED.to_string());

        let mut record = ActivityRecord::new(
            date,
            ActivitySource::Jira,
            ActivityKind::Issue,
            &issue.key,
            project,
            fields.summary.clone().unwrap_or_default(),
        );
        record.status = status;
        record.description = flatten_adf(&fields.description);
        record.assignee = Some(assignee);
        record.updated_at = fields.updated.as_deref().and_then(parse_jira_timestamp);
        record.raw = issue.raw.clone();
        record
    }
}

#[async_trait]
impl ActivityFetcher for JiraClient {
    fn source(&self) -> ActivitySource {
        ActivitySource::Jira
    }

    async fn fetch_activity(&self, date: NaiveDate) -> Result<Vec<ActivityRecord>> {
        let issues = self.search_issues(date).await?;
        info!(%date, project = %self.project_key, issues = issues.len(), "Fetched Jira issues");

        let mut records = Vec::with_capacity(issues.len());
        for issue in &issues {
            let mut record = self.to_record(issue, date);
            if self.fetch_worklogs {
                match self.fetch_worklogs(&issue.id, date).await {
                    Ok(worklogs) => record.worklogs = worklogs,
                    Err(err) => {
                        warn!(key = %issue.key, error = %err, "Failed to fetch worklogs");
                    }
                }
            }
            records.push(record);
        }
        Ok(records)
    }
}
