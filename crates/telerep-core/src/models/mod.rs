//! Data models shared by the extractors, the analysis helpers and the CLI.

pub mod config;
pub mod report;
pub mod sample;
