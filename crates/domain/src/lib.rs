//! # Daysheet Domain
//!
//! Business domain types and models for Daysheet.
//!
//! This crate contains:
//! - Activity records and daily log documents (ActivityRecord, DailyLog)
//! - Timesheet rows and task selection types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and text utilities
//!
//! ## Architecture
//! - No dependencies on other Daysheet crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export text utilities used by adapters
pub use utils::adf::flatten_adf;
