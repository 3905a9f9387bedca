//! Activity records fetched from Jira and GitHub

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Where an activity record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivitySource {
    Jira,
    Github,
}

impl_domain_status_conversions!(ActivitySource {
    Jira => "jira",
    Github => "github",
});

/// What kind of activity a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Jira issue updated on the day
    Issue,
    /// Commit authored on the day
    Commit,
    /// Pull request opened, closed, or merged on the day
    PullRequest,
    /// Branch or tag created on the day
    Create,
}

impl_domain_status_conversions!(ActivityKind {
    Issue => "issue",
    Commit => "commit",
    PullRequest => "pull_request",
    Create => "create",
});

/// Time logged against a Jira issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worklog {
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    pub started_date: NaiveDate,
    pub time_spent_seconds: i64,
}

/// One issue, commit, or event fetched for a single calendar day.
///
/// Records are immutable once fetched. `raw` holds the upstream item as the
/// source returned it (a Jira issue, a commit search hit, or a feed event) so
/// cached logs can be re-analysed without another network call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub date: NaiveDate,
    pub source: ActivitySource,
    pub kind: ActivityKind,
    /// Issue key, commit SHA, or pull request URL
    pub key: String,
    /// Jira project name or GitHub `owner/repo`
    pub project: String,
    /// Workflow status (Jira only), e.g. "In Progress"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub worklogs: Vec<Worklog>,
    #[serde(default)]
    pub raw: serde_json::Value,
}

impl ActivityRecord {
    /// Create a record with only the identifying fields set.
    pub fn new(
        date: NaiveDate,
        source: ActivitySource,
        kind: ActivityKind,
        key: impl Into<String>,
        project: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            date,
            source,
            kind,
            key: key.into(),
            project: project.into(),
            status: None,
            title: title.into(),
            description: None,
            assignee: None,
            updated_at: None,
            worklogs: Vec::new(),
            raw: serde_json::Value::Null,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Seconds logged on the record's own date.
    pub fn logged_seconds(&self) -> i64 {
        self.worklogs
            .iter()
            .filter(|w| w.started_date == self.date)
            .map(|w| w.time_spent_seconds)
            .sum()
    }
}
