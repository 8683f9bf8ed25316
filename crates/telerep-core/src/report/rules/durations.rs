//! Conversation duration extraction (`HH:MM:SS`).

use super::numbers::round2;
use super::patterns::CLOCK_DURATION;
use super::{ExtractionMatch, FieldExtractor, MatchKind};

/// A duration read from an `HH:MM:SS` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockDuration {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockDuration {
    /// Parse `HH:MM:SS`.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = CLOCK_DURATION.captures(s.trim())?;
        Some(Self {
            hours: caps["hours"].parse().ok()?,
            minutes: caps["minutes"].parse().ok()?,
            seconds: caps["seconds"].parse().ok()?,
        })
    }

    /// `MM + SS/60` rounded to 2 decimals.
    ///
    /// The hour component is ignored: report durations are conversation
    /// averages and are read as staying under one hour.
    pub fn minutes_within_hour(&self) -> f64 {
        round2(self.minutes as f64 + self.seconds as f64 / 60.0)
    }
}

/// Duration field extractor.
pub struct DurationExtractor;

impl DurationExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DurationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DurationExtractor {
    type Output = ExtractionMatch<ClockDuration>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CLOCK_DURATION
            .find_iter(text)
            .filter_map(|full_match| {
                let duration = ClockDuration::parse(full_match.as_str())?;
                Some(
                    ExtractionMatch::new(duration, MatchKind::Positional, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}

/// Format minutes as `HH:MM`.
pub fn format_duration(minutes: f64) -> String {
    let minutes = minutes.max(0.0);
    let hours = (minutes / 60.0).floor() as u64;
    let mins = (minutes % 60.0).floor() as u64;
    format!("{:02}:{:02}", hours, mins)
}
