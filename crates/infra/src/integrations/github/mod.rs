//! GitHub integration
//!
//! Collects one user's activity for a day from two endpoints:
//! - commit search (`/search/commits`), deduplicated by SHA
//! - the user's public event feed (`/users/{user}/events`), keeping pull
//!   request and branch/tag creation events
//!
//! The event feed is best effort: a failure there is logged and the commit
//! results are still returned.

pub mod client;
pub mod types;

pub use client::GithubClient;
