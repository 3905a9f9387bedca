//! Integration tests for the insights aggregator

mod support;

use std::sync::Arc;

use daysheet_core::InsightsService;
use daysheet_domain::{ActivitySource, DailyLog, DaysheetError, Worklog};
use support::fixtures::{commit, date, issue};
use support::ports::MemoryLogCache;

fn github_day(day: u32, repos: &[&str]) -> DailyLog {
    let records = repos
        .iter()
        .enumerate()
        .map(|(i, repo)| commit(day, repo, &format!("{day}-{i}"), "work", 9))
        .collect();
    DailyLog::new(date(day)).with_source_records(ActivitySource::Github, records, None)
}

#[test]
fn test_longest_inactivity_streak() {
    let cache = MemoryLogCache::new();
    for day in [1, 3, 4, 7] {
        cache.seed(github_day(day, &["acme/api"]));
    }

    let report = InsightsService::new(Arc::new(cache)).report(date(1), date(7)).unwrap();

    let streak = report.longest_inactivity.unwrap();
    assert_eq!((streak.start, streak.end, streak.days), (date(5), date(6), 2));
    assert_eq!(report.active_days, 4);
    assert_eq!(report.total_days, 7);
}

#[test]
fn test_context_switch_days() {
    let cache = MemoryLogCache::new();
    cache.seed(github_day(1, &["acme/api", "acme/web"]));
    cache.seed(github_day(2, &["acme/api", "acme/web"]).with_source_records(
        ActivitySource::Jira,
        vec![issue(2, "PAY-1", "Done", 9)],
        None,
    ));

    let report = InsightsService::new(Arc::new(cache)).report(date(1), date(2)).unwrap();

    assert!(!report.days[0].context_switching);
    assert!(report.days[1].context_switching);
    assert_eq!(report.days[1].touched, vec!["github:acme/api", "github:acme/web", "jira:Payments"]);
    assert_eq!(report.context_switch_days, 1);
}

#[test]
fn test_project_tallies() {
    let cache = MemoryLogCache::new();
    let mut worked = issue(1, "PAY-1", "In Progress", 9);
    worked.worklogs.push(Worklog {
        author: "Sam".into(),
        author_email: None,
        started_date: date(1),
        time_spent_seconds: 7200,
    });
    cache.seed(
        github_day(1, &["acme/api", "acme/api"])
            .with_source_records(ActivitySource::Jira, vec![worked], None),
    );
    cache.seed(DailyLog::new(date(2)).with_source_records(
        ActivitySource::Jira,
        vec![issue(2, "PAY-1", "Done", 9), issue(2, "PAY-2", "Done", 10)],
        None,
    ));

    let report = InsightsService::new(Arc::new(cache)).report(date(1), date(2)).unwrap();

    assert_eq!(report.tallies.len(), 2);
    let jira = &report.tallies[0];
    assert_eq!(jira.source, ActivitySource::Jira);
    assert_eq!(jira.tickets, 2);
    assert_eq!(jira.logged_seconds, 7200);
    assert_eq!(jira.active_days, 2);

    let api = &report.tallies[1];
    assert_eq!(api.project, "acme/api");
    assert_eq!(api.commits, 2);
    assert_eq!(api.active_days, 1);
}

#[test]
fn test_unreadable_logs_count_as_inactive() {
    let cache = MemoryLogCache::new();
    cache.seed(github_day(1, &["acme/api"]));
    cache.seed_corrupt(date(2));

    let report = InsightsService::new(Arc::new(cache)).report(date(1), date(3)).unwrap();

    assert_eq!(report.unreadable, vec![date(2)]);
    assert_eq!(report.active_days, 1);
    assert_eq!(report.longest_inactivity.unwrap().days, 2);
}

#[test]
fn test_reversed_range_is_rejected() {
    let service = InsightsService::new(Arc::new(MemoryLogCache::new()));
    assert!(matches!(service.report(date(3), date(1)), Err(DaysheetError::InvalidInput(_))));
}
