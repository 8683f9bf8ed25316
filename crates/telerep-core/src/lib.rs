//! Core library for call-center activity report parsing.
//!
//! This crate provides:
//! - PDF processing (text extraction and table reconstruction)
//! - Monthly section segmentation and rule-based field extraction
//! - Report data models with the French field names of the export format
//! - KPI analysis (summary statistics, trends, recommendations)

pub mod analysis;
pub mod error;
pub mod models;
pub mod pdf;
pub mod report;

pub use analysis::{ReportAnalysis, analyze};
pub use error::{ReportError, Result};
pub use models::config::ReportConfig;
pub use models::report::{
    AgentRecord, KpiRecord, Month, MonthlyRecord, ParseResult, ResolutionRecord, TicketRecord,
};
pub use models::sample::sample_report;
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor, RawTable};
pub use report::{ReportParser, TelephonyReportParser};
