//! Pure text helpers shared by adapters and services

pub mod adf;
pub mod text;
