//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ActivitySource;

/// Main error type for Daysheet
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DaysheetError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A single activity source could not be fetched for one day.
    #[error("{origin} fetch failed: {message}")]
    SourceFetch { origin: ActivitySource, message: String },

    /// A cached daily log exists but could not be read or parsed.
    #[error("Cache read error: {0}")]
    CacheRead(String),

    #[error("Cache write error: {0}")]
    CacheWrite(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DaysheetError {
    /// Whether a failure of this kind only degrades a single day.
    ///
    /// Configuration and input errors are fatal for the whole run; every
    /// other variant is absorbed by the per-day fallback rules.
    pub fn is_day_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::InvalidInput(_))
    }

    /// Re-label an adapter error as a failure of `source`.
    pub fn into_source_fetch(self, source: ActivitySource) -> Self {
        match self {
            Self::SourceFetch { .. } | Self::Config(_) => self,
            other => Self::SourceFetch { origin: source, message: other.to_string() },
        }
    }
}

/// Result type alias for Daysheet operations
pub type Result<T> = std::result::Result<T, DaysheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_fetch_display_names_source() {
        let err = DaysheetError::SourceFetch {
            origin: ActivitySource::Jira,
            message: "HTTP 503".into(),
        };
        assert_eq!(err.to_string(), "jira fetch failed: HTTP 503");
    }

    #[test]
    fn into_source_fetch_wraps_network_errors() {
        let err = DaysheetError::Network("HTTP request timed out".into())
            .into_source_fetch(ActivitySource::Github);
        match err {
            DaysheetError::SourceFetch { origin, message } => {
                assert_eq!(origin, ActivitySource::Github);
                assert!(message.contains("timed out"));
            }
            other => panic!("expected source fetch error, got {other:?}"),
        }
    }

    #[test]
    fn config_errors_are_fatal() {
        assert!(!DaysheetError::Config("missing JIRA_API_TOKEN".into()).is_day_recoverable());
        assert!(DaysheetError::CacheRead("bad json".into()).is_day_recoverable());
        assert!(DaysheetError::Summarization("503".into()).is_day_recoverable());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(DaysheetError::Auth("HTTP 401".into())).unwrap();
        assert_eq!(json["type"], "Auth");
        assert_eq!(json["message"], "HTTP 401");
    }
}
