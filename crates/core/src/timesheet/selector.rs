//! Task selection rules
//!
//! A day is represented by at most one Jira task. Candidates are ranked by
//! status tier (finished, in progress, other), then by most recent update,
//! then by issue key. When a day has no activity at all, the most recent
//! in-progress task from an earlier cached day is carried forward unless a
//! later cached day shows it finished.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use daysheet_domain::{ActivityRecord, ActivitySource, DailyLog, SelectedTask, TaskTier};

/// Total order over Jira candidates; the best candidate sorts first.
pub fn compare_candidates(a: &ActivityRecord, b: &ActivityRecord) -> Ordering {
    let tier_a = TaskTier::from_status(a.status.as_deref());
    let tier_b = TaskTier::from_status(b.status.as_deref());

    tier_a
        .cmp(&tier_b)
        .then_with(|| match (a.updated_at, b.updated_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.key.cmp(&b.key))
}

/// Pick the representative Jira task for a day.
///
/// Non-Jira records in `candidates` are ignored.
pub fn select_task(candidates: &[ActivityRecord]) -> Option<SelectedTask> {
    candidates
        .iter()
        .filter(|r| r.source == ActivitySource::Jira)
        .min_by(|a, b| compare_candidates(a, b))
        .map(SelectedTask::from_record)
}

/// Find a task to carry forward from earlier logs.
///
/// `prior_logs` must be ordered nearest date first. The first log holding an
/// in-progress task that no later log marked finished wins; within that log
/// the usual candidate order applies.
pub fn carry_forward<'a, I>(prior_logs: I) -> Option<SelectedTask>
where
    I: IntoIterator<Item = &'a DailyLog>,
{
    let mut resolved: HashSet<&str> = HashSet::new();

    for log in prior_logs {
        let best = log
            .records
            .iter()
            .filter(|r| r.source == ActivitySource::Jira)
            .filter(|r| TaskTier::from_status(r.status.as_deref()) == TaskTier::InProgress)
            .filter(|r| !resolved.contains(r.key.as_str()))
            .min_by(|a, b| compare_candidates(a, b));

        if let Some(record) = best {
            return Some(SelectedTask::from_record(record).continued(log.date));
        }

        resolved.extend(
            log.records
                .iter()
                .filter(|r| r.source == ActivitySource::Jira)
                .filter(|r| TaskTier::from_status(r.status.as_deref()) == TaskTier::Completed)
                .map(|r| r.key.as_str()),
        );
    }

    None
}

/// Dates eligible for carry-forward into `date`, nearest first.
pub fn lookback_window(
    available: &[NaiveDate],
    date: NaiveDate,
    lookback_days: u32,
) -> Vec<NaiveDate> {
    let earliest =
        date.checked_sub_days(Days::new(u64::from(lookback_days))).unwrap_or(NaiveDate::MIN);
    let mut window: Vec<NaiveDate> =
        available.iter().copied().filter(|d| *d < date && *d >= earliest).collect();
    window.sort_unstable_by(|a, b| b.cmp(a));
    window
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use daysheet_domain::ActivityKind;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn issue(day: u32, key: &str, status: &str, hour: Option<u32>) -> ActivityRecord {
        let record = ActivityRecord::new(
            date(day),
            ActivitySource::Jira,
            ActivityKind::Issue,
            key,
            "Payments",
            format!("Title of {key}"),
        )
        .with_status(status);
        match hour {
            Some(h) => record.with_updated_at(Utc.with_ymd_and_hms(2024, 6, day, h, 0, 0).unwrap()),
            None => record,
        }
    }

    fn log(day: u32, records: Vec<ActivityRecord>) -> DailyLog {
        DailyLog::new(date(day)).with_source_records(ActivitySource::Jira, records, None)
    }

    #[test]
    fn completed_beats_in_progress_and_other() {
        let candidates = vec![
            issue(3, "PAY-1", "In Progress", Some(17)),
            issue(3, "PAY-2", "To Do", Some(18)),
            issue(3, "PAY-3", "Closed", Some(9)),
        ];
        assert_eq!(select_task(&candidates).unwrap().key, "PAY-3");
    }

    #[test]
    fn in_progress_beats_other() {
        let candidates =
            vec![issue(3, "PAY-1", "Review", Some(17)), issue(3, "PAY-2", "in progress", Some(8))];
        assert_eq!(select_task(&candidates).unwrap().key, "PAY-2");
    }

    #[test]
    fn most_recent_update_wins_within_a_tier() {
        let candidates =
            vec![issue(3, "PAY-1", "Done", Some(9)), issue(3, "PAY-2", "Resolved", Some(15))];
        for _ in 0..5 {
            assert_eq!(select_task(&candidates).unwrap().key, "PAY-2");
        }
        let reversed: Vec<_> = candidates.into_iter().rev().collect();
        assert_eq!(select_task(&reversed).unwrap().key, "PAY-2");
    }

    #[test]
    fn missing_timestamps_sort_last_then_by_key() {
        let candidates = vec![
            issue(3, "PAY-9", "Done", None),
            issue(3, "PAY-4", "Done", None),
            issue(3, "PAY-7", "Done", Some(1)),
        ];
        assert_eq!(select_task(&candidates).unwrap().key, "PAY-7");

        let untimed = vec![issue(3, "PAY-9", "Done", None), issue(3, "PAY-4", "Done", None)];
        assert_eq!(select_task(&untimed).unwrap().key, "PAY-4");
    }

    #[test]
    fn no_candidates_selects_nothing() {
        assert!(select_task(&[]).is_none());
    }

    #[test]
    fn carry_forward_takes_nearest_in_progress_task() {
        let logs = vec![
            log(4, vec![issue(4, "PAY-5", "To Do", Some(10))]),
            log(2, vec![issue(2, "PAY-1", "In Progress", Some(10))]),
            log(1, vec![issue(1, "PAY-0", "In Progress", Some(10))]),
        ];
        let task = carry_forward(&logs).unwrap();
        assert_eq!(task.key, "PAY-1");
        assert_eq!(task.continued_from, Some(date(2)));
    }

    #[test]
    fn carry_forward_skips_tasks_finished_later() {
        let logs = vec![
            log(4, vec![issue(4, "PAY-1", "Done", Some(10))]),
            log(2, vec![issue(2, "PAY-1", "In Progress", Some(10))]),
        ];
        assert!(carry_forward(&logs).is_none());
    }

    #[test]
    fn lookback_window_is_bounded_and_descending() {
        let available = vec![date(1), date(10), date(20), date(25), date(26)];
        assert_eq!(lookback_window(&available, date(25), 10), vec![date(20)]);
        assert_eq!(lookback_window(&available, date(25), 30), vec![date(20), date(10), date(1)]);
    }

    #[test]
    fn lookback_window_saturates_at_the_earliest_date() {
        let available = vec![date(1), date(20)];
        assert_eq!(lookback_window(&available, date(25), u32::MAX), vec![date(20), date(1)]);
    }
}
