//! Command-line definitions

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "daysheet",
    version,
    about = "Turn daily Jira and GitHub activity into timesheet rows"
)]
pub struct Cli {
    /// Load configuration from this file instead of probing the usual paths
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build one timesheet row per day and print the report as JSON
    Generate {
        #[command(flatten)]
        range: RangeArgs,

        /// Refetch days that are already cached
        #[arg(long)]
        refresh: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Fetch and cache activity without summarizing
    Fetch {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long)]
        refresh: bool,
    },
    /// Compute streaks, context switching, and per-project tallies from the cache
    Insights {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List the dates with a cached activity log
    Dates,
}

/// Inclusive date range, `YYYY-MM-DD`
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct RangeArgs {
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,
}

impl RangeArgs {
    /// Fill in missing ends: `to` defaults to `today`, `from` to the start of
    /// a `default_days` window ending at `to`.
    pub fn resolve(self, today: NaiveDate, default_days: u32) -> (NaiveDate, NaiveDate) {
        let to = self.to.unwrap_or(today);
        let span = i64::from(default_days.max(1) - 1);
        let from = self.from.unwrap_or_else(|| to - chrono::Duration::days(span));
        (from, to)
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}
