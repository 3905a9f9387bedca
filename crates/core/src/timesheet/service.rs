//! Timesheet assembly service - core business logic

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use daysheet_domain::constants::{
    DEFAULT_LOOKBACK_DAYS, DEFAULT_MAX_RANGE_DAYS, NO_ACTIVITY_REMARK,
};
use daysheet_domain::{
    ActivityRecord, ActivitySource, DailyLog, DayDiagnostics, DaysheetError, EmployeeProfile,
    RemarkInput, RemarkOrigin, Result, SelectedTask, TimesheetReport, TimesheetRow,
};
use tracing::{debug, info, warn};

use super::ports::{ActivityFetcher, LogCache, Summarizer};
use super::remark::{commit_messages, compose_fallback_remark};
use super::selector::{carry_forward, lookback_window, select_task};

/// Per-run switches for [`TimesheetService::generate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Refetch every date even when a cached log exists
    pub refresh: bool,
}

/// Timesheet assembly service
///
/// Processes dates in ascending order, one at a time, so carry-forward can
/// read logs cached for earlier days in the same run.
pub struct TimesheetService {
    jira: Arc<dyn ActivityFetcher>,
    github: Arc<dyn ActivityFetcher>,
    cache: Arc<dyn LogCache>,
    summarizer: Arc<dyn Summarizer>,
    employee: EmployeeProfile,
    lookback_days: u32,
    max_range_days: u32,
    today: Option<NaiveDate>,
}

impl TimesheetService {
    /// Create a new timesheet service
    pub fn new(
        jira: Arc<dyn ActivityFetcher>,
        github: Arc<dyn ActivityFetcher>,
        cache: Arc<dyn LogCache>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            jira,
            github,
            cache,
            summarizer,
            employee: EmployeeProfile::default(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
            today: None,
        }
    }

    /// Metadata copied onto every row
    pub fn with_employee(mut self, employee: EmployeeProfile) -> Self {
        self.employee = employee;
        self
    }

    /// How many days back carry-forward may look
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn with_max_range_days(mut self, days: u32) -> Self {
        self.max_range_days = days;
        self
    }

    /// Pin "today" instead of reading the clock. Dates before today are
    /// served from the cache when possible.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Reject reversed or oversized ranges before any fetch begins.
    ///
    /// # Errors
    /// Returns `DaysheetError::InvalidInput` describing the problem.
    pub fn validate_range(&self, from: NaiveDate, to: NaiveDate) -> Result<()> {
        if from > to {
            return Err(DaysheetError::InvalidInput(format!(
                "Range start {from} is after range end {to}"
            )));
        }
        let days = (to - from).num_days() + 1;
        if days > i64::from(self.max_range_days) {
            return Err(DaysheetError::InvalidInput(format!(
                "Range of {days} days exceeds the maximum of {}",
                self.max_range_days
            )));
        }
        Ok(())
    }

    /// Generate one row per date in `from..=to`.
    ///
    /// Only an invalid range is fatal; per-day failures are logged and
    /// returned in the report diagnostics.
    pub async fn generate(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        options: GenerateOptions,
    ) -> Result<TimesheetReport> {
        self.validate_range(from, to)?;
        info!(%from, %to, refresh = options.refresh, "Generating timesheet");

        let mut rows = Vec::new();
        let mut diagnostics = Vec::new();
        for date in from.iter_days().take_while(|d| *d <= to) {
            let (row, diag) = self.build_day(date, options).await;
            rows.push(row);
            diagnostics.push(diag);
        }

        let report = TimesheetReport { from, to, rows, diagnostics };
        info!(rows = report.rows.len(), failures = report.failure_count(), "Timesheet generated");
        Ok(report)
    }

    /// Fetch (or reuse) and cache the logs for `from..=to` without
    /// summarizing anything.
    pub async fn fetch_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        options: GenerateOptions,
    ) -> Result<Vec<DayDiagnostics>> {
        self.validate_range(from, to)?;
        let mut diagnostics = Vec::new();
        for date in from.iter_days().take_while(|d| *d <= to) {
            let mut diag = DayDiagnostics::new(date);
            self.collect_day(date, options, &mut diag).await;
            diagnostics.push(diag);
        }
        Ok(diagnostics)
    }

    async fn build_day(
        &self,
        date: NaiveDate,
        options: GenerateOptions,
    ) -> (TimesheetRow, DayDiagnostics) {
        let mut diag = DayDiagnostics::new(date);
        let log = self.collect_day(date, options, &mut diag).await;

        let jira = log.records_for(ActivitySource::Jira);
        let github = log.records_for(ActivitySource::Github);

        let mut task = select_task(&jira);
        if task.is_none() && github.is_empty() {
            task = self.find_carry_forward(date, &mut diag);
        }

        let input = RemarkInput::new(date, task.clone(), commit_messages(&github));
        let (remark, origin) = self.remark_for(&input, &mut diag).await;

        debug!(
            %date,
            task = task.as_ref().map(|t| t.key.as_str()),
            origin = ?origin,
            "Built timesheet row"
        );
        (TimesheetRow::new(date, task, remark, origin, &self.employee), diag)
    }

    /// Load or fetch the log for one date, caching whatever was fetched.
    async fn collect_day(
        &self,
        date: NaiveDate,
        options: GenerateOptions,
        diag: &mut DayDiagnostics,
    ) -> DailyLog {
        let cached = match self.cache.get(date) {
            Ok(log) => log,
            Err(err) => {
                warn!(%date, error = %err, "Ignoring unreadable cached log");
                diag.record(err);
                None
            }
        };

        // A past day is served from the cache once every source has a fetch
        // stamp. Sources that failed earlier are fetched again.
        let (want_jira, want_github) = match &cached {
            Some(log) if !options.refresh && date < self.today() => (
                log.fetched_at.get(ActivitySource::Jira).is_none(),
                log.fetched_at.get(ActivitySource::Github).is_none(),
            ),
            _ => (true, true),
        };
        if let Some(log) = &cached {
            if !want_jira && !want_github {
                debug!(%date, "Using cached log");
                diag.from_cache = true;
                return log.clone();
            }
            if !(want_jira && want_github) {
                debug!(%date, want_jira, want_github, "Refetching sources missing from cache");
            }
        }

        let (jira, github) = tokio::join!(
            async {
                if want_jira {
                    Some(self.jira.fetch_activity(date).await)
                } else {
                    None
                }
            },
            async {
                if want_github {
                    Some(self.github.fetch_activity(date).await)
                } else {
                    None
                }
            }
        );

        let mut log = cached.clone().unwrap_or_else(|| DailyLog::new(date));
        let mut fetched_any = false;
        for (source, result) in [(ActivitySource::Jira, jira), (ActivitySource::Github, github)] {
            let Some(result) = result else { continue };
            match result {
                Ok(records) => {
                    fetched_any = true;
                    log = merge_source(log, cached.as_ref(), source, records);
                }
                Err(err) => {
                    let err = err.into_source_fetch(source);
                    warn!(%date, %source, error = %err, "Source fetch failed");
                    if log.has_source(source) {
                        info!(%date, %source, "Reusing cached records for failed source");
                    }
                    diag.record(err);
                }
            }
        }

        if fetched_any {
            if let Err(err) = self.cache.put(&log) {
                warn!(%date, error = %err, "Failed to cache daily log");
                diag.record(err);
            }
        }
        log
    }

    fn find_carry_forward(
        &self,
        date: NaiveDate,
        diag: &mut DayDiagnostics,
    ) -> Option<SelectedTask> {
        let available = match self.cache.list_available_dates() {
            Ok(dates) => dates,
            Err(err) => {
                warn!(%date, error = %err, "Cannot list cached logs for carry-forward");
                diag.record(err);
                return None;
            }
        };

        let logs: Vec<DailyLog> = lookback_window(&available, date, self.lookback_days)
            .into_iter()
            .filter_map(|d| match self.cache.get(d) {
                Ok(log) => log,
                Err(err) => {
                    debug!(date = %d, error = %err, "Skipping unreadable log during carry-forward");
                    None
                }
            })
            .collect();

        let task = carry_forward(&logs);
        if let Some(task) = &task {
            info!(%date, key = %task.key, from = ?task.continued_from, "Carrying task forward");
        }
        task
    }

    async fn remark_for(
        &self,
        input: &RemarkInput,
        diag: &mut DayDiagnostics,
    ) -> (String, RemarkOrigin) {
        if input.is_empty() {
            return (NO_ACTIVITY_REMARK.to_string(), RemarkOrigin::NoActivity);
        }

        match self.summarizer.summarize(input).await {
            Ok(text) if !text.trim().is_empty() => {
                (text.trim().to_string(), RemarkOrigin::Generated)
            }
            Ok(_) => {
                let err =
                    DaysheetError::Summarization("Summarizer returned an empty remark".into());
                warn!(date = %input.date, error = %err, "Using fallback remark");
                diag.record(err);
                (compose_fallback_remark(input), RemarkOrigin::Fallback)
            }
            Err(err) => {
                warn!(date = %input.date, error = %err, "Using fallback remark");
                diag.record(err);
                (compose_fallback_remark(input), RemarkOrigin::Fallback)
            }
        }
    }
}

/// Replace one source's records, keeping the previous fetch time when the
/// upstream data has not changed so the cached document stays identical.
fn merge_source(
    log: DailyLog,
    cached: Option<&DailyLog>,
    source: ActivitySource,
    records: Vec<ActivityRecord>,
) -> DailyLog {
    let candidate = DailyLog::new(log.date).with_source_records(source, records.clone(), None);

    let unchanged = cached.is_some_and(|prev| {
        prev.fetched_at.get(source).is_some() && prev.same_source_records(&candidate, source)
    });
    let stamp = match cached {
        Some(prev) if unchanged => prev.fetched_at.get(source),
        _ => Some(Utc::now()),
    };
    log.with_source_records(source, records, stamp)
}
