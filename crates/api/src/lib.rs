//! # Daysheet CLI
//!
//! Application layer - command-line front end and wiring.
//!
//! This crate contains:
//! - The `clap` command definitions
//! - Application context (dependency injection)
//! - Command handlers producing JSON reports
//! - Logging setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use cli::{Cli, Command};
pub use context::AppContext;
