//! Jira Cloud integration
//!
//! Fetches the issues of one project updated on a given day through the
//! enhanced JQL search endpoint (`/rest/api/3/search/jql`), paging with
//! `nextPageToken`. Descriptions arrive as Atlassian Document Format and are
//! flattened to plain text. Worklogs are fetched per issue when enabled and
//! filtered to the requested day.

pub mod client;
pub mod types;

pub use client::JiraClient;
