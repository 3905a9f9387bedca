//! Timesheet generation
//!
//! - `ports`: boundaries to the activity sources, the log cache, and the
//!   summarizer
//! - `selector`: the task prioritization and carry-forward rules
//! - `remark`: commit ordering and the locally composed fallback remark
//! - `service`: the per-day assembler

pub mod ports;
pub mod remark;
pub mod selector;
pub mod service;

pub use service::{GenerateOptions, TimesheetService};
