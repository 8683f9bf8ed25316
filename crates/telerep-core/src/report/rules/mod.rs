//! Rule-based field extractors for call-center reports.

pub mod agents;
pub mod calls;
pub mod durations;
pub mod kpi;
pub mod monthly;
pub mod numbers;
pub mod patterns;
pub mod policy;
pub mod tables;

pub use agents::AgentExtractor;
pub use calls::{CallCounts, CallCountsExtractor};
pub use durations::{ClockDuration, DurationExtractor, format_duration};
pub use kpi::extract_kpis;
pub use monthly::MonthlyExtractor;
pub use numbers::{format_number_french, parse_count, parse_french_decimal, round2};
pub use policy::{FieldOutcome, MissingPolicy};
pub use tables::{extract_resolution, extract_tickets};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// How a value was located in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Found next to its label.
    Labeled,
    /// Inferred from its position only.
    Positional,
}

/// Extracted value with its provenance.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// How the value was located.
    pub kind: MatchKind,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, kind: MatchKind, source: impl Into<String>) -> Self {
        Self {
            value,
            kind,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Confidence score (0.0 - 1.0).
    pub fn confidence(&self) -> f32 {
        match self.kind {
            MatchKind::Labeled => 0.95,
            MatchKind::Positional => 0.5,
        }
    }

    pub fn is_positional(&self) -> bool {
        self.kind == MatchKind::Positional
    }
}
