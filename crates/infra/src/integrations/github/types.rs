//! GitHub REST response types

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::integrations::Captured;

#[derive(Debug, Deserialize)]
pub(crate) struct CommitSearchResponse {
    #[serde(default)]
    pub items: Vec<Captured<CommitItem>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitItem {
    pub sha: String,
    #[serde(default)]
    pub html_url: Option<String>,
    pub commit: CommitDetail,
    #[serde(default)]
    pub repository: Option<RepositoryRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub committer: Option<Signature>,
    #[serde(default)]
    pub author: Option<Signature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Signature {
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryRef {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub repo: Option<EventRepo>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventRepo {
    pub name: String,
}
