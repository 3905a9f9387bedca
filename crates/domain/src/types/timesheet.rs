//! Task selection and timesheet report types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::activity::ActivityRecord;
use crate::config::EmployeeProfile;
use crate::constants::{TIER_0_STATUSES, TIER_1_STATUS};
use crate::errors::DaysheetError;

/// Priority tier derived from a Jira workflow status.
///
/// Lower tiers win: finished work is the best description of a day, work in
/// progress is second, anything else comes last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskTier {
    Completed,
    InProgress,
    Other,
}

impl TaskTier {
    /// Classify a status string, ignoring case and surrounding whitespace.
    pub fn from_status(status: Option<&str>) -> Self {
        let Some(status) = status else {
            return Self::Other;
        };
        let normalized = status.trim().to_lowercase();
        if TIER_0_STATUSES.contains(&normalized.as_str()) {
            Self::Completed
        } else if normalized == TIER_1_STATUS {
            Self::InProgress
        } else {
            Self::Other
        }
    }
}

/// The Jira task chosen to represent a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTask {
    pub key: String,
    pub project: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Set when the task was carried forward from an earlier day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continued_from: Option<NaiveDate>,
}

impl SelectedTask {
    pub fn from_record(record: &ActivityRecord) -> Self {
        Self {
            key: record.key.clone(),
            project: record.project.clone(),
            title: record.title.clone(),
            status: record.status.clone(),
            description: record.description.clone(),
            updated_at: record.updated_at,
            continued_from: None,
        }
    }

    /// Mark the task as a continuation of `origin`'s work.
    pub fn continued(mut self, origin: NaiveDate) -> Self {
        self.continued_from = Some(origin);
        self
    }

    pub fn is_continued(&self) -> bool {
        self.continued_from.is_some()
    }

    pub fn tier(&self) -> TaskTier {
        TaskTier::from_status(self.status.as_deref())
    }
}

/// Everything the summarizer needs to write a remark for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemarkInput {
    pub date: NaiveDate,
    pub task: Option<SelectedTask>,
    /// Commit messages first (oldest first), then pull request and branch
    /// summaries.
    pub commit_messages: Vec<String>,
}

impl RemarkInput {
    pub fn new(date: NaiveDate, task: Option<SelectedTask>, commit_messages: Vec<String>) -> Self {
        Self { date, task, commit_messages }
    }

    /// No task and no commits: the summarizer must not be called.
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.commit_messages.is_empty()
    }
}

/// How a row's remark was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemarkOrigin {
    /// Written by the language model
    Generated,
    /// Composed locally from the task and commit list
    Fallback,
    /// Fixed remark for a day with nothing to report
    NoActivity,
}

/// One row of the generated timesheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetRow {
    pub date: NaiveDate,
    pub task: Option<SelectedTask>,
    pub remark: String,
    pub remark_origin: RemarkOrigin,
    pub employee_id: String,
    pub employee_name: String,
    pub role: String,
    pub site: String,
    pub billable: bool,
    pub authorized_hours: f32,
}

impl TimesheetRow {
    pub fn new(
        date: NaiveDate,
        task: Option<SelectedTask>,
        remark: impl Into<String>,
        remark_origin: RemarkOrigin,
        employee: &EmployeeProfile,
    ) -> Self {
        Self {
            date,
            task,
            remark: remark.into(),
            remark_origin,
            employee_id: employee.employee_id.clone(),
            employee_name: employee.employee_name.clone(),
            role: employee.role.clone(),
            site: employee.site.clone(),
            billable: employee.billable,
            authorized_hours: employee.authorized_hours,
        }
    }

    /// Flatten the row into the dashboard's column layout.
    pub fn to_dashboard(&self) -> DashboardRow {
        let task = self.task.as_ref();
        DashboardRow {
            employee_id: self.employee_id.clone(),
            employee_name: self.employee_name.clone(),
            date: self.date.format("%Y-%m-%d").to_string(),
            project: task.map(|t| t.project.clone()).unwrap_or_default(),
            task: task.map(|t| format!("{} {}", t.key, t.title)).unwrap_or_default(),
            task_description: task.and_then(|t| t.description.clone()).unwrap_or_default(),
            authorized_hours: self.authorized_hours,
            billable: if self.billable { "Yes".to_string() } else { "No".to_string() },
            role: self.role.clone(),
            site: self.site.clone(),
            status: task.and_then(|t| t.status.clone()).unwrap_or_default(),
            remark: self.remark.clone(),
            continued_from: task
                .and_then(|t| t.continued_from)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// A timesheet row using the dashboard's column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRow {
    #[serde(rename = "Employee Id")]
    pub employee_id: String,
    #[serde(rename = "Employee Name")]
    pub employee_name: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Project")]
    pub project: String,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Task Description")]
    pub task_description: String,
    #[serde(rename = "Authorized Hours")]
    pub authorized_hours: f32,
    #[serde(rename = "Billable")]
    pub billable: String,
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "Site")]
    pub site: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Remark")]
    pub remark: String,
    /// Date the carried task was last worked on; empty unless carried forward
    #[serde(rename = "Continued From")]
    pub continued_from: String,
}

/// What went wrong (or was reused) while building one day's row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDiagnostics {
    pub date: NaiveDate,
    /// The day's log came from the cache instead of a fresh fetch.
    pub from_cache: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DaysheetError>,
}

impl DayDiagnostics {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, from_cache: false, failures: Vec::new() }
    }

    pub fn record(&mut self, error: DaysheetError) {
        self.failures.push(error);
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A generated timesheet covering an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub rows: Vec<TimesheetRow>,
    pub diagnostics: Vec<DayDiagnostics>,
}

impl TimesheetReport {
    pub fn row_for(&self, date: NaiveDate) -> Option<&TimesheetRow> {
        self.rows.iter().find(|r| r.date == date)
    }

    pub fn failure_count(&self) -> usize {
        self.diagnostics.iter().map(|d| d.failures.len()).sum()
    }
}
