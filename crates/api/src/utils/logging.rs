use std::time::Duration;

use daysheet_domain::DaysheetError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Events go to
/// stderr so stdout carries only command output.
///
/// # Errors
/// Fails when a global subscriber is already installed.
pub fn init_tracing(json: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    if json {
        builder.json().try_init()
    } else {
        builder.with_target(false).try_init()
    }
    .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"timesheet::generate"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - The failure, if any.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&DaysheetError>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => {
            warn!(
                command,
                duration_ms,
                error_type = error_label(err),
                error = %err,
                "command_execution_failure"
            );
        }
    }
}

/// Convert a `DaysheetError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &DaysheetError) -> &'static str {
    match error {
        DaysheetError::Config(_) => "config",
        DaysheetError::Network(_) => "network",
        DaysheetError::Auth(_) => "auth",
        DaysheetError::NotFound(_) => "not_found",
        DaysheetError::InvalidInput(_) => "invalid_input",
        DaysheetError::SourceFetch { .. } => "source_fetch",
        DaysheetError::CacheRead(_) => "cache_read",
        DaysheetError::CacheWrite(_) => "cache_write",
        DaysheetError::Summarization(_) => "summarization",
        DaysheetError::Serialization(_) => "serialization",
        DaysheetError::Internal(_) => "internal",
    }
}
