use std::fs;
use std::io::Write;
use std::path::Path;

use daysheet_domain::{DaysheetError, Result};
use serde::Serialize;
use tracing::info;

/// Write `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
///
/// # Errors
/// `Serialization` when the value cannot be encoded, `Internal` on I/O
/// failure.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)
        .map_err(|e| DaysheetError::Serialization(e.to_string()))?;
    text.push('\n');

    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    DaysheetError::Internal(format!("Failed to create {}: {e}", parent.display()))
                })?;
            }
            fs::write(path, text).map_err(|e| {
                DaysheetError::Internal(format!("Failed to write {}: {e}", path.display()))
            })?;
            info!(path = %path.display(), "Report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| DaysheetError::Internal(format!("Failed to write to stdout: {e}")))?;
        }
    }
    Ok(())
}
