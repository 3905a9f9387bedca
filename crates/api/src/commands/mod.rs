//! Command handlers
//!
//! Each handler returns a serializable result; [`execute`] times it, logs
//! the outcome, and writes the JSON output.

mod dates;
mod fetch;
mod generate;
mod insights;

use std::time::Instant;

use daysheet_domain::Result;

pub use dates::cached_dates;
pub use fetch::{fetch, FetchOutput};
pub use generate::{generate, GenerateOutput};
pub use insights::insights;

use crate::cli::Command;
use crate::context::AppContext;
use crate::utils::logging::log_command_execution;
use crate::utils::output::write_json;

/// Run one CLI command against `ctx`.
///
/// # Errors
/// Fatal errors only: configuration problems, invalid ranges, and output
/// failures. Per-day failures are reported inside the output.
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    let start = Instant::now();
    let (name, result) = match command {
        Command::Generate { range, refresh, output } => (
            "timesheet::generate",
            match generate(ctx, range, refresh).await {
                Ok(report) => write_json(&report, output.as_deref()),
                Err(err) => Err(err),
            },
        ),
        Command::Fetch { range, refresh } => (
            "timesheet::fetch",
            match fetch(ctx, range, refresh).await {
                Ok(summary) => write_json(&summary, None),
                Err(err) => Err(err),
            },
        ),
        Command::Insights { range, output } => (
            "insights::report",
            insights(ctx, range).and_then(|report| write_json(&report, output.as_deref())),
        ),
        Command::Dates => {
            ("cache::dates", cached_dates(ctx).and_then(|dates| write_json(&dates, None)))
        }
    };

    log_command_execution(name, start.elapsed(), result.as_ref().err());
    result
}
