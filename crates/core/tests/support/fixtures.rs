//! Record builders for a fixed test month

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use daysheet_domain::{ActivityKind, ActivityRecord, ActivitySource, DailyLog};

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
}

/// Jira issue updated at `hour` on `day`.
pub fn issue(day: u32, key: &str, status: &str, hour: u32) -> ActivityRecord {
    ActivityRecord::new(
        date(day),
        ActivitySource::Jira,
        ActivityKind::Issue,
        key,
        "Payments",
        format!("{key} title"),
    )
    .with_status(status)
    .with_updated_at(Utc.with_ymd_and_hms(2024, 9, day, hour, 0, 0).unwrap())
}

/// Commit pushed at `hour` on `day`.
pub fn commit(day: u32, repo: &str, sha: &str, message: &str, hour: u32) -> ActivityRecord {
    ActivityRecord::new(date(day), ActivitySource::Github, ActivityKind::Commit, sha, repo, message)
        .with_updated_at(Utc.with_ymd_and_hms(2024, 9, day, hour, 0, 0).unwrap())
}

/// Evening fetch time on `day`.
pub fn fetched(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, day, 20, 0, 0).unwrap()
}

/// Log for `day` where both sources were fetched successfully.
pub fn complete_log(
    day: u32,
    jira: Vec<ActivityRecord>,
    github: Vec<ActivityRecord>,
) -> DailyLog {
    DailyLog::new(date(day))
        .with_source_records(ActivitySource::Jira, jira, Some(fetched(day)))
        .with_source_records(ActivitySource::Github, github, Some(fetched(day)))
}
