//! Per-date cache document

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::activity::{ActivityRecord, ActivitySource};

/// When each source was last fetched successfully for the day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchStamps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<DateTime<Utc>>,
}

impl FetchStamps {
    pub fn get(&self, source: ActivitySource) -> Option<DateTime<Utc>> {
        match source {
            ActivitySource::Jira => self.jira,
            ActivitySource::Github => self.github,
        }
    }

    pub fn set(&mut self, source: ActivitySource, at: Option<DateTime<Utc>>) {
        match source {
            ActivitySource::Jira => self.jira = at,
            ActivitySource::Github => self.github = at,
        }
    }
}

/// All records fetched for one calendar date.
///
/// Records are kept in canonical order (source, project, key) so that the
/// serialized document depends only on the upstream data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    #[serde(default)]
    pub fetched_at: FetchStamps,
    #[serde(default)]
    pub records: Vec<ActivityRecord>,
}

impl DailyLog {
    /// Create an empty log for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self { date, fetched_at: FetchStamps::default(), records: Vec::new() }
    }

    /// Replace the records of one source, stamping the fetch time.
    pub fn with_source_records(
        mut self,
        source: ActivitySource,
        records: Vec<ActivityRecord>,
        fetched_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.records.retain(|r| r.source != source);
        self.records.extend(records);
        self.fetched_at.set(source, fetched_at);
        self.canonicalize();
        self
    }

    /// Sort records into canonical order and drop duplicate keys per source.
    pub fn canonicalize(&mut self) {
        self.records.sort_by(|a, b| {
            (a.source, &a.project, &a.key, a.kind).cmp(&(b.source, &b.project, &b.key, b.kind))
        });
        self.records.dedup_by(|a, b| a.source == b.source && a.key == b.key && a.kind == b.kind);
    }

    /// Records for a single source, in canonical order.
    pub fn records_for(&self, source: ActivitySource) -> Vec<ActivityRecord> {
        self.records.iter().filter(|r| r.source == source).cloned().collect()
    }

    pub fn has_source(&self, source: ActivitySource) -> bool {
        self.records.iter().any(|r| r.source == source)
    }

    /// A log with no records counts as an inactive day.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `other` carries exactly the same records for `source`.
    pub fn same_source_records(&self, other: &Self, source: ActivitySource) -> bool {
        let mine = self.records.iter().filter(|r| r.source == source);
        let theirs = other.records.iter().filter(|r| r.source == source);
        mine.eq(theirs)
    }
}
