use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use daysheet_core::LogCache;
use daysheet_domain::constants::{DAILY_LOG_EXTENSION, DAILY_LOG_PREFIX};
use daysheet_domain::{DailyLog, DaysheetError, Result};
use tracing::{debug, instrument, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// File-backed [`LogCache`] writing one JSON document per day
#[derive(Debug, Clone)]
pub struct JsonLogCache {
    dir: PathBuf,
}

impl JsonLogCache {
    /// Use `dir` as the log directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `date`
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(file_name(date))
    }
}

fn file_name(date: NaiveDate) -> String {
    format!("{DAILY_LOG_PREFIX}{}.{DAILY_LOG_EXTENSION}", date.format(DATE_FORMAT))
}

fn parse_file_name(name: &str) -> Option<NaiveDate> {
    let stem = name
        .strip_prefix(DAILY_LOG_PREFIX)?
        .strip_suffix(DAILY_LOG_EXTENSION)?
        .strip_suffix('.')?;
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}

fn write_error(path: &Path, err: impl std::fmt::Display) -> DaysheetError {
    DaysheetError::CacheWrite(format!("{}: {err}", path.display()))
}

impl LogCache for JsonLogCache {
    #[instrument(skip(self, log), fields(date = %log.date, records = log.records.len()))]
    fn put(&self, log: &DailyLog) -> Result<()> {
        let path = self.path_for(log.date);
        let mut data = serde_json::to_vec_pretty(log).map_err(|e| write_error(&path, e))?;
        data.push(b'\n');

        fs::create_dir_all(&self.dir).map_err(|e| write_error(&self.dir, e))?;

        // Write to a temporary file first so readers never see a partial document
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| write_error(&temp_path, e))?;
        file.write_all(&data).map_err(|e| write_error(&temp_path, e))?;
        file.sync_all().map_err(|e| write_error(&temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, &path).map_err(|e| write_error(&path, e))?;
        debug!(path = %path.display(), bytes = data.len(), "Wrote daily log");
        Ok(())
    }

    fn get(&self, date: NaiveDate) -> Result<Option<DailyLog>> {
        let path = self.path_for(date);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(DaysheetError::CacheRead(format!("{}: {err}", path.display())));
            }
        };

        let log: DailyLog = serde_json::from_slice(&bytes)
            .map_err(|e| DaysheetError::CacheRead(format!("{}: {e}", path.display())))?;
        if log.date != date {
            return Err(DaysheetError::CacheRead(format!(
                "{}: document is dated {}",
                path.display(),
                log.date
            )));
        }
        Ok(Some(log))
    }

    fn list_available_dates(&self) -> Result<Vec<NaiveDate>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(DaysheetError::CacheRead(format!("{}: {err}", self.dir.display())));
            }
        };

        let mut dates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DaysheetError::CacheRead(e.to_string()))?;
            let name = entry.file_name();
            match name.to_str().and_then(parse_file_name) {
                Some(date) => dates.push(date),
                None => debug!(file = ?name, "Skipping non-log file"),
            }
        }
        dates.sort_unstable();
        dates.dedup();
        if dates.is_empty() {
            warn!(dir = %self.dir.display(), "No cached daily logs found");
        }
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        assert_eq!(file_name(date), "activity_2024-05-13.json");
        assert_eq!(parse_file_name("activity_2024-05-13.json"), Some(date));
    }

    #[test]
    fn unrelated_names_are_ignored() {
        assert_eq!(parse_file_name("activity_2024-05-13.tmp"), None);
        assert_eq!(parse_file_name("notes.json"), None);
        assert_eq!(parse_file_name("activity_2024-13-40.json"), None);
        assert_eq!(parse_file_name("activity_2024-05-13json"), None);
    }
}
