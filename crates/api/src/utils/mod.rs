//! Logging and output helpers for the CLI

pub mod logging;
pub mod output;
