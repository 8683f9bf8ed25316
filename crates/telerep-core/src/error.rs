//! Error types for the telerep-core library.

use thiserror::Error;

/// Main error type for the telerep library.
#[derive(Error, Debug)]
pub enum ReportError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Report field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to opening and reading a PDF document.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors that abort report extraction as a whole.
///
/// A field that simply does not match is never an error; these variants are
/// reserved for failures that make the whole document unusable.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A pattern built from configuration could not be compiled.
    #[error("invalid pattern for {context}: {source}")]
    Pattern {
        context: String,
        #[source]
        source: regex::Error,
    },

    /// The configuration holds a value the extractors cannot work with.
    #[error("invalid extraction setting {setting}: {reason}")]
    InvalidSetting { setting: String, reason: String },
}

/// Result type for the telerep library.
pub type Result<T> = std::result::Result<T, ReportError>;
