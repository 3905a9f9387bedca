//! Domain types and models
//!
//! - `activity`: raw records returned by the Jira and GitHub adapters
//! - `daily_log`: the per-date cache document
//! - `timesheet`: task selection, remark inputs, and report rows
//! - `insights`: read-only statistics over cached logs

pub mod activity;
pub mod daily_log;
pub mod insights;
pub mod timesheet;

pub use activity::{ActivityKind, ActivityRecord, ActivitySource, Worklog};
pub use daily_log::{DailyLog, FetchStamps};
pub use insights::{DayContext, InactivityStreak, InsightsReport, ProjectTally};
pub use timesheet::{
    DashboardRow, DayDiagnostics, RemarkInput, RemarkOrigin, SelectedTask, TaskTier,
    TimesheetReport, TimesheetRow,
};
