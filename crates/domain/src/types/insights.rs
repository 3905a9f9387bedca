//! Statistics computed from cached daily logs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::activity::ActivitySource;

/// A run of consecutive dates with no recorded activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InactivityStreak {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: u32,
}

/// Distinct projects and repositories touched on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayContext {
    pub date: NaiveDate,
    /// `source:project` labels, sorted
    pub touched: Vec<String>,
    pub context_switching: bool,
}

impl DayContext {
    pub fn switch_count(&self) -> usize {
        self.touched.len()
    }
}

/// Activity totals for one Jira project or GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTally {
    pub source: ActivitySource,
    pub project: String,
    pub commits: u32,
    pub pull_requests: u32,
    pub creates: u32,
    /// Distinct Jira issue keys
    pub tickets: u32,
    pub logged_seconds: i64,
    pub active_days: u32,
}

impl ProjectTally {
    pub fn new(source: ActivitySource, project: impl Into<String>) -> Self {
        Self {
            source,
            project: project.into(),
            commits: 0,
            pull_requests: 0,
            creates: 0,
            tickets: 0,
            logged_seconds: 0,
            active_days: 0,
        }
    }
}

/// Read-only analytics over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_days: u32,
    pub active_days: u32,
    pub longest_inactivity: Option<InactivityStreak>,
    pub days: Vec<DayContext>,
    pub context_switch_days: u32,
    pub tallies: Vec<ProjectTally>,
    /// Cached documents that could not be read; counted as inactive.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unreadable: Vec<NaiveDate>,
}
