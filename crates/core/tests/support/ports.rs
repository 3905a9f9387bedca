//! In-memory mocks for the core ports

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use daysheet_core::{ActivityFetcher, LogCache, Summarizer};
use daysheet_domain::{
    ActivityRecord, ActivitySource, DailyLog, DaysheetError, RemarkInput, Result as DomainResult,
};

/// Fetcher returning canned records per date.
///
/// Dates without an entry return no records; dates registered with
/// [`MockFetcher::failing_on`] return a network error.
#[derive(Clone)]
pub struct MockFetcher {
    source: ActivitySource,
    records: Arc<HashMap<NaiveDate, Vec<ActivityRecord>>>,
    failing: Arc<Vec<NaiveDate>>,
    calls: Arc<AtomicUsize>,
}

impl MockFetcher {
    pub fn new(source: ActivitySource) -> Self {
        Self {
            source,
            records: Arc::new(HashMap::new()),
            failing: Arc::new(Vec::new()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_records(mut self, date: NaiveDate, records: Vec<ActivityRecord>) -> Self {
        Arc::make_mut(&mut self.records).insert(date, records);
        self
    }

    pub fn failing_on(mut self, date: NaiveDate) -> Self {
        Arc::make_mut(&mut self.failing).push(date);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivityFetcher for MockFetcher {
    fn source(&self) -> ActivitySource {
        self.source
    }

    async fn fetch_activity(&self, date: NaiveDate) -> DomainResult<Vec<ActivityRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&date) {
            return Err(DaysheetError::Network(format!("{} unreachable", self.source)));
        }
        Ok(self.records.get(&date).cloned().unwrap_or_default())
    }
}

/// Log cache held in memory, stored as serialized JSON so tests can compare
/// documents byte for byte.
#[derive(Default, Clone)]
pub struct MemoryLogCache {
    documents: Arc<Mutex<BTreeMap<NaiveDate, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryLogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, log: DailyLog) {
        self.put(&log).unwrap();
    }

    /// Store bytes that do not parse as a daily log.
    pub fn seed_corrupt(&self, date: NaiveDate) {
        self.documents.lock().unwrap().insert(date, "{ not json".to_string());
    }

    pub fn document(&self, date: NaiveDate) -> Option<String> {
        self.documents.lock().unwrap().get(&date).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl LogCache for MemoryLogCache {
    fn put(&self, log: &DailyLog) -> DomainResult<()> {
        let text = serde_json::to_string_pretty(log)
            .map_err(|e| DaysheetError::CacheWrite(e.to_string()))?;
        self.documents.lock().unwrap().insert(log.date, text);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn get(&self, date: NaiveDate) -> DomainResult<Option<DailyLog>> {
        let docs = self.documents.lock().unwrap();
        match docs.get(&date) {
            Some(text) => serde_json::from_str(text)
                .map(Some)
                .map_err(|e| DaysheetError::CacheRead(e.to_string())),
            None => Ok(None),
        }
    }

    fn list_available_dates(&self) -> DomainResult<Vec<NaiveDate>> {
        Ok(self.documents.lock().unwrap().keys().copied().collect())
    }
}

/// Summarizer that echoes the task key and commit count, or always fails.
#[derive(Default, Clone)]
pub struct MockSummarizer {
    fail: bool,
    seen: Arc<Mutex<Vec<RemarkInput>>>,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn inputs(&self) -> Vec<RemarkInput> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, input: &RemarkInput) -> DomainResult<String> {
        self.seen.lock().unwrap().push(input.clone());
        if self.fail {
            return Err(DaysheetError::Summarization("model unavailable".into()));
        }
        let task = input.task.as_ref().map_or("none", |t| t.key.as_str());
        Ok(format!("Summary for {task} with {} commits", input.commit_messages.len()))
    }
}
