//! Call-center report extraction module.

mod parser;
pub mod rules;
pub mod sections;

pub use parser::TelephonyReportParser;
pub use sections::{MonthSections, month_sections};

use crate::error::ExtractionError;
use crate::models::report::ParseResult;
use crate::pdf::RawTable;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for report parsers working on already extracted content.
pub trait ReportParser {
    /// Parse a report from its full text and reconstructed tables.
    fn parse_content(&self, text: &str, tables: &[RawTable]) -> Result<ParseResult>;

    /// Parse a report from plain text only.
    fn parse_text(&self, text: &str) -> Result<ParseResult> {
        self.parse_content(text, &[])
    }
}
