//! Port interfaces for timesheet generation
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use daysheet_domain::{ActivityRecord, ActivitySource, DailyLog, RemarkInput, Result};

/// Trait for fetching one day of activity from an upstream source
#[async_trait]
pub trait ActivityFetcher: Send + Sync {
    /// Which source this fetcher reads
    fn source(&self) -> ActivitySource;

    /// Fetch every record for `date` (UTC calendar day)
    async fn fetch_activity(&self, date: NaiveDate) -> Result<Vec<ActivityRecord>>;
}

/// Trait for the per-date log store
///
/// Uses a synchronous API: the store is a handful of small local files.
pub trait LogCache: Send + Sync {
    /// Overwrite the document for `log.date`
    fn put(&self, log: &DailyLog) -> Result<()>;

    /// Read the document for `date`, `Ok(None)` when nothing is cached
    ///
    /// # Errors
    /// `DaysheetError::CacheRead` when a document exists but cannot be parsed.
    fn get(&self, date: NaiveDate) -> Result<Option<DailyLog>>;

    /// Dates with a cached document, ascending
    fn list_available_dates(&self) -> Result<Vec<NaiveDate>>;
}

/// Trait for turning a day's remark input into a one-paragraph remark
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize a non-empty remark input
    async fn summarize(&self, input: &RemarkInput) -> Result<String>;
}
