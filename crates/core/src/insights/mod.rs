//! Read-only analytics over cached daily logs

pub mod service;

pub use service::{compute_insights, InsightsService};
