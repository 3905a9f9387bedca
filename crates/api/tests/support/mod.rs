//! Shared fixtures for CLI integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use daysheet_domain::{Config, LlmProvider};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SEARCH_PATH: &str = "/rest/api/3/search/jql";

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

/// Complete configuration pointing both sources at `server`, with the LLM
/// disabled and the cache in `logs`.
pub fn test_config(server: &MockServer, logs: &TempDir) -> Config {
    let mut config = Config::default();
    config.jira.base_url = Some(server.uri());
    config.jira.email = Some("dev@acme.io".into());
    config.jira.api_token = Some("jira-token".into());
    config.jira.project_key = Some("PAY".into());
    config.github.token = Some("gh-token".into());
    config.github.username = Some("dev".into());
    config.github.api_url = server.uri();
    config.llm.provider = LlmProvider::Disabled;
    config.cache.logs_dir = logs.path().to_path_buf();
    config.employee.employee_id = "E-042".into();
    config.employee.employee_name = "Sam Doe".into();
    config.http.max_attempts = 1;
    config.http.timeout_secs = 5;
    config
}

pub fn jql(date: NaiveDate) -> String {
    format!(
        "project = PAY AND updated >= '{}' AND updated < '{}' ORDER BY updated DESC",
        date,
        date.succ_opt().unwrap()
    )
}

pub fn issue_json(key: &str, status: &str, updated: &str) -> Value {
    json!({
        "id": format!("id-{key}"),
        "key": key,
        "fields": {
            "summary": format!("{key} summary"),
            "status": {"name": status},
            "updated": updated,
            "project": {"key": "PAY", "name": "Payments"}
        }
    })
}

pub fn commit_json(sha: &str, message: &str, committed: &str) -> Value {
    json!({
        "sha": sha,
        "commit": {"message": message, "committer": {"date": committed}},
        "repository": {"full_name": "acme/api"}
    })
}

pub async fn mount_issues(server: &MockServer, date: NaiveDate, issues: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("jql", jql(date).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"issues": issues, "isLast": true})),
        )
        .mount(server)
        .await;
}

pub async fn mount_commits(server: &MockServer, date: NaiveDate, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/search/commits"))
        .and(query_param("q", format!("author:dev committer-date:{date}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": items})))
        .mount(server)
        .await;
}

/// Empty answers for every request not matched by a more specific mock.
/// Mount after the specific mocks.
pub async fn mount_quiet_defaults(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"issues": [], "isLast": true})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/dev/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}
