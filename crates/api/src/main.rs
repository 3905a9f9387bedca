//! Daysheet - daily Jira and GitHub activity to timesheet rows
//!
//! Main entry point for the command-line application.

use std::process::ExitCode;

use clap::Parser;
use daysheet_lib::utils::logging::init_tracing;
use daysheet_lib::{commands, AppContext, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging FIRST so we can see .env loading
    if let Err(err) = init_tracing(cli.json_logs) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "daysheet failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded .env"),
        Err(err) => tracing::debug!(error = %err, "No .env file loaded"),
    }

    let ctx = AppContext::load(cli.config)?;
    commands::execute(&ctx, cli.command).await?;
    Ok(())
}
