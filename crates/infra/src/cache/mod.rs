//! Per-date activity log storage
//!
//! One pretty-printed JSON document per calendar day, named
//! `activity_YYYY-MM-DD.json`, inside a single directory.

mod json_log_cache;

pub use json_log_cache::JsonLogCache;
