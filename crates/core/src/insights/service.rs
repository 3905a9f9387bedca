//! Insights aggregation service
//!
//! Pure reductions over the log cache. Nothing here triggers a network
//! fetch; dates without a readable document count as inactive.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use daysheet_domain::constants::CONTEXT_SWITCH_THRESHOLD;
use daysheet_domain::{
    ActivityKind, ActivitySource, DailyLog, DayContext, DaysheetError, InactivityStreak,
    InsightsReport, ProjectTally, Result,
};
use tracing::{debug, warn};

use crate::timesheet::ports::LogCache;

/// Insights aggregation service
pub struct InsightsService {
    cache: Arc<dyn LogCache>,
}

impl InsightsService {
    pub fn new(cache: Arc<dyn LogCache>) -> Self {
        Self { cache }
    }

    /// Compute insights for `from..=to` from whatever is cached.
    ///
    /// # Errors
    /// `InvalidInput` for a reversed range, or the cache's error when the
    /// available dates cannot be listed.
    pub fn report(&self, from: NaiveDate, to: NaiveDate) -> Result<InsightsReport> {
        if from > to {
            return Err(DaysheetError::InvalidInput(format!(
                "Range start {from} is after range end {to}"
            )));
        }

        let mut logs = BTreeMap::new();
        let mut unreadable = Vec::new();
        let dates = self.cache.list_available_dates()?;
        for date in dates.into_iter().filter(|d| *d >= from && *d <= to) {
            match self.cache.get(date) {
                Ok(Some(log)) => {
                    logs.insert(date, log);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(%date, error = %err, "Treating unreadable log as inactive");
                    unreadable.push(date);
                }
            }
        }
        debug!(%from, %to, cached = logs.len(), "Computing insights");

        let mut report = compute_insights(from, to, &logs);
        report.unreadable = unreadable;
        Ok(report)
    }
}

/// Reduce cached logs for `from..=to` into an insights report.
pub fn compute_insights(
    from: NaiveDate,
    to: NaiveDate,
    logs: &BTreeMap<NaiveDate, DailyLog>,
) -> InsightsReport {
    let dates: Vec<NaiveDate> = from.iter_days().take_while(|d| *d <= to).collect();
    let is_active = |date: &NaiveDate| logs.get(date).is_some_and(|log| !log.is_empty());

    let days: Vec<DayContext> = dates
        .iter()
        .filter_map(|d| logs.get(d))
        .filter(|l| !l.is_empty())
        .map(day_context)
        .collect();

    InsightsReport {
        from,
        to,
        total_days: count(dates.len()),
        active_days: count(dates.iter().filter(|d| is_active(*d)).count()),
        longest_inactivity: longest_inactivity(&dates, is_active),
        context_switch_days: count(days.iter().filter(|d| d.context_switching).count()),
        days,
        tallies: tallies(logs.range(from..=to).map(|(_, log)| log)),
        unreadable: Vec::new(),
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Longest run of inactive dates; the earliest run wins ties.
fn longest_inactivity<F>(dates: &[NaiveDate], is_active: F) -> Option<InactivityStreak>
where
    F: Fn(&NaiveDate) -> bool,
{
    let mut best: Option<InactivityStreak> = None;
    let mut current: Option<InactivityStreak> = None;

    for date in dates {
        if is_active(date) {
            current = None;
            continue;
        }
        let streak = match current.take() {
            Some(mut streak) => {
                streak.end = *date;
                streak.days += 1;
                streak
            }
            None => InactivityStreak { start: *date, end: *date, days: 1 },
        };
        if best.as_ref().map_or(true, |b| streak.days > b.days) {
            best = Some(streak.clone());
        }
        current = Some(streak);
    }
    best
}

fn day_context(log: &DailyLog) -> DayContext {
    let touched: BTreeSet<String> =
        log.records.iter().map(|r| format!("{}:{}", r.source, r.project)).collect();
    let context_switching = touched.len() > CONTEXT_SWITCH_THRESHOLD;
    DayContext { date: log.date, touched: touched.into_iter().collect(), context_switching }
}

fn tallies<'a, I>(logs: I) -> Vec<ProjectTally>
where
    I: IntoIterator<Item = &'a DailyLog>,
{
    let mut totals: BTreeMap<(ActivitySource, String), ProjectTally> = BTreeMap::new();
    let mut tickets: HashSet<(ActivitySource, String, String)> = HashSet::new();
    let mut days: HashSet<(ActivitySource, String, NaiveDate)> = HashSet::new();

    for log in logs {
        for record in &log.records {
            let id = (record.source, record.project.clone());
            let tally = totals
                .entry(id)
                .or_insert_with(|| ProjectTally::new(record.source, record.project.clone()));

            match record.kind {
                ActivityKind::Commit => tally.commits += 1,
                ActivityKind::PullRequest => tally.pull_requests += 1,
                ActivityKind::Create => tally.creates += 1,
                ActivityKind::Issue => {
                    if tickets.insert((record.source, record.project.clone(), record.key.clone())) {
                        tally.tickets += 1;
                    }
                }
            }
            tally.logged_seconds += record.logged_seconds();
            if days.insert((record.source, record.project.clone(), log.date)) {
                tally.active_days += 1;
            }
        }
    }

    totals.into_values().collect()
}
