//! # Daysheet Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for activity sources, the log cache, and the summarizer
//! - Task selection and carry-forward rules
//! - The timesheet assembler and the insights aggregator
//!
//! ## Architecture Principles
//! - Only depends on `daysheet-domain`
//! - No HTTP or filesystem code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod insights;
pub mod timesheet;

pub use insights::InsightsService;
pub use timesheet::ports::{ActivityFetcher, LogCache, Summarizer};
pub use timesheet::{GenerateOptions, TimesheetService};
