//! GitHub REST client implementing the activity fetcher port

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use daysheet_core::ActivityFetcher;
use daysheet_domain::utils::text::first_line;
use daysheet_domain::{
    ActivityKind, ActivityRecord, ActivitySource, DaysheetError, GithubConfig, Result,
};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::types::{CommitSearchResponse, Event};
use crate::http::HttpClient;
use crate::integrations::Captured;

const API_VERSION: &str = "2022-11-28";
const COMMIT_PAGE_SIZE: u32 = 100;
const EVENT_PAGE_SIZE: u32 = 100;
/// The events API serves at most 300 events.
const MAX_EVENT_PAGES: u32 = 3;
const UNKNOWN_REPO: &str = "unknown";

/// GitHub client scoped to one user
pub struct GithubClient {
    http_client: HttpClient,
    token: String,
    username: String,
    api_url: String,
}

impl GithubClient {
    pub fn new(
        http_client: HttpClient,
        token: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            token: token.into(),
            username: username.into(),
            api_url: daysheet_domain::constants::DEFAULT_GITHUB_API_URL.to_string(),
        }
    }

    /// Build a client from the `[github]` configuration section.
    ///
    /// # Errors
    /// Returns `DaysheetError::Config` when the token or username is missing.
    pub fn from_config(config: &GithubConfig, http_client: HttpClient) -> Result<Self> {
        let token = config
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| DaysheetError::Config("Missing GitHub setting: token".into()))?;
        let username = config
            .username
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| DaysheetError::Config("Missing GitHub setting: username".into()))?;
        Ok(Self::new(http_client, token, username).with_api_url(&config.api_url))
    }

    /// Point the client at another API root (GitHub Enterprise or tests).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http_client
            .request(Method::GET, format!("{}{}", self.api_url, path))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Commits authored by the user with a committer date of `date`.
    pub async fn search_commits(&self, date: NaiveDate) -> Result<Vec<ActivityRecord>> {
        let query =
            format!("author:{} committer-date:{}", self.username, date.format("%Y-%m-%d"));
        let request = self.get("/search/commits").query(&[
            ("q", query),
            ("sort", "committer-date".to_string()),
            ("order", "desc".to_string()),
            ("per_page", COMMIT_PAGE_SIZE.to_string()),
        ]);
        let response: CommitSearchResponse = self.http_client.send_json(request).await?;

        let mut seen = HashSet::new();
        let records = response
            .items
            .into_iter()
            .filter(|item| seen.insert(item.sha.clone()))
            .map(|item| {
                let repo = item
                    .repository
                    .as_ref()
                    .map_or_else(|| UNKNOWN_REPO.to_string(), |r| r.full_name.clone());
                let committed_at = item
                    .commit
                    .committer
                    .as_ref()
                    .and_then(|s| s.date)
                    .or_else(|| item.commit.author.as_ref().and_then(|s| s.date));

                let mut record = ActivityRecord::new(
                    date,
                    ActivitySource::Github,
                    ActivityKind::Commit,
                    &item.sha,
                    repo,
                    first_line(&item.commit.message),
                );
                let message = item.commit.message.trim();
                if !message.is_empty() {
                    record.description = Some(message.to_string());
                }
                record.updated_at = committed_at;
                record.raw = item.raw;
                record
            })
            .collect();
        Ok(records)
    }

    /// Pull request and create events from the user's feed on `date`.
    pub async fn fetch_events(&self, date: NaiveDate) -> Result<Vec<ActivityRecord>> {
        let path = format!("/users/{}/events", self.username);
        let mut records = Vec::new();

        'pages: for page in 1..=MAX_EVENT_PAGES {
            let request = self.get(&path).query(&[
                ("per_page", EVENT_PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ]);
            let events: Vec<Captured<Event>> = self.http_client.send_json(request).await?;
            debug!(%date, page, events = events.len(), "Received GitHub events page");
            if events.is_empty() {
                break;
            }

            for event in events {
                let Some(created_at) = event.created_at else {
                    continue;
                };
                let event_date = created_at.date_naive();
                if event_date < date {
                    // The feed is newest first.
                    break 'pages;
                }
                if event_date == date {
                    if let Some(record) = event_record(&event, date) {
                        records.push(record);
                    }
                }
            }
        }
        Ok(records)
    }
}

fn event_record(event: &Captured<Event>, date: NaiveDate) -> Option<ActivityRecord> {
    let repo = event.repo.as_ref().map_or(UNKNOWN_REPO, |r| r.name.as_str());
    let payload = &event.payload;
    let text = |field: &str| payload.get(field).and_then(Value::as_str).unwrap_or_default();
    let created_at = event.created_at?;

    let mut record = match event.event_type.as_str() {
        "CreateEvent" => {
            let ref_type = text("ref_type");
            let reference = payload.get("ref").and_then(Value::as_str).unwrap_or("unknown");
            ActivityRecord::new(
                date,
                ActivitySource::Github,
                ActivityKind::Create,
                format!("create-{}-{}", reference, created_at.to_rfc3339()),
                repo,
                format!("Created {ref_type} '{reference}'"),
            )
        }
        "PullRequestEvent" => {
            let action = text("action");
            let pr = payload.get("pull_request").cloned().unwrap_or(Value::Null);
            let title = pr.get("title").and_then(Value::as_str).unwrap_or_default();
            let url = pr.get("html_url").and_then(Value::as_str).unwrap_or_default();
            ActivityRecord::new(
                date,
                ActivitySource::Github,
                ActivityKind::PullRequest,
                url,
                repo,
                format!("PR {action}: {title}"),
            )
            .with_description(format!("Pull Request: {title} ({action})"))
        }
        _ => return None,
    };
    record.updated_at = Some(created_at);
    record.raw = event.raw.clone();
    Some(record)
}

#[async_trait]
impl ActivityFetcher for GithubClient {
    fn source(&self) -> ActivitySource {
        ActivitySource::Github
    }

    async fn fetch_activity(&self, date: NaiveDate) -> Result<Vec<ActivityRecord>> {
        let (events, commits) = tokio::join!(self.fetch_events(date), self.search_commits(date));

        let mut records = match events {
            Ok(events) => events,
            Err(err) => {
                warn!(
                    %date,
                    error = %err,
                    "Failed to fetch GitHub events; continuing with commits"
                );
                Vec::new()
            }
        };
        let commits = commits?;
        info!(
            %date,
            user = %self.username,
            commits = commits.len(),
            events = records.len(),
            "Fetched GitHub activity"
        );
        records.extend(commits);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::RetryPolicy;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 13).unwrap()
    }

    fn test_client(api_url: String) -> GithubClient {
        let http_client = HttpClient::with_timeout(Duration::from_secs(5), RetryPolicy::none())
            .expect("http client");
        GithubClient::new(http_client, "gh-token", "dev").with_api_url(api_url)
    }

    fn commit_json(sha: &str, message: &str) -> Value {
        json!({
            "sha": sha,
            "html_url": format!("https://github.com/acme/api/commit/{sha}"),
            "commit": {
                "message": message,
                "committer": {"date": "2024-05-13T14:00:00Z"}
            },
            "repository": {"full_name": "acme/api"}
        })
    }

    async fn mount_commits(server: &MockServer, items: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/search/commits"))
            .and(query_param("q", "author:dev committer-date:2024-05-13"))
            .and(header("Authorization", "Bearer gh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn commits_are_deduplicated_and_titled_by_first_line() {
        let server = MockServer::start().await;
        mount_commits(
            &server,
            vec![
                commit_json("abc", "Fix refund rounding\n\nLong explanation"),
                commit_json("abc", "Fix refund rounding\n\nLong explanation"),
                commit_json("def", "Add tests"),
            ],
        )
        .await;

        let commits = test_client(server.uri()).search_commits(day()).await.expect("commits");

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].title, "Fix refund rounding");
        assert_eq!(commits[0].project, "acme/api");
        assert_eq!(commits[0].kind, ActivityKind::Commit);
        assert!(commits[0].updated_at.is_some());
        assert_eq!(commits[0].raw["html_url"], "https://github.com/acme/api/commit/abc");
        assert_eq!(commits[0].raw["commit"]["committer"]["date"], "2024-05-13T14:00:00Z");
    }

    #[tokio::test]
    async fn events_stop_once_older_than_the_day() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/dev/events"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "type": "PullRequestEvent",
                    "repo": {"name": "acme/api"},
                    "created_at": "2024-05-14T08:00:00Z",
                    "payload": {
                        "action": "closed",
                        "pull_request": {"title": "Later", "html_url": "u0"}
                    }
                },
                {
                    "type": "PullRequestEvent",
                    "repo": {"name": "acme/api"},
                    "created_at": "2024-05-13T16:00:00Z",
                    "payload": {
                        "action": "opened",
                        "pull_request": {"title": "Refunds", "html_url": "u1"}
                    }
                },
                {
                    "type": "CreateEvent",
                    "repo": {"name": "acme/web"},
                    "created_at": "2024-05-13T09:00:00Z",
                    "payload": {"ref_type": "branch", "ref": "feature/refunds"}
                },
                {
                    "type": "PushEvent",
                    "repo": {"name": "acme/web"},
                    "created_at": "2024-05-13T08:00:00Z",
                    "payload": {}
                },
                {
                    "type": "CreateEvent",
                    "repo": {"name": "acme/web"},
                    "created_at": "2024-05-12T09:00:00Z",
                    "payload": {"ref_type": "tag", "ref": "v1"}
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let events = test_client(server.uri()).fetch_events(day()).await.expect("events");

        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["PR opened: Refunds", "Created branch 'feature/refunds'"]);
        assert_eq!(events[0].key, "u1");
        assert_eq!(events[1].project, "acme/web");
        assert_eq!(events[1].raw["payload"]["ref"], "feature/refunds");
    }

    #[tokio::test]
    async fn event_failure_does_not_fail_the_fetch() {
        let server = MockServer::start().await;
        mount_commits(&server, vec![commit_json("abc", "Fix")]).await;
        Mock::given(method("GET"))
            .and(path("/users/dev/events"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let records = test_client(server.uri()).fetch_activity(day()).await.expect("records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "abc");
    }

    #[tokio::test]
    async fn commit_search_failure_fails_the_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/commits"))
            .respond_with(ResponseTemplate::new(422).set_body_string("Validation Failed"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/dev/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let result = test_client(server.uri()).fetch_activity(day()).await;
        assert!(matches!(result, Err(DaysheetError::InvalidInput(_))));
    }
}
