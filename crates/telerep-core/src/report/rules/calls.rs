//! Handled vs presented call counts of a monthly section.

use super::patterns::{CALLS_LABELED, CLOCK_DURATION, INTEGER_PAIR};
use super::{ExtractionMatch, FieldExtractor, MatchKind};

/// Calls handled and presented in one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub handled: u64,
    pub presented: u64,
}

/// Call counts extractor.
///
/// Looks for the `Appels Traités vs Présentés` label first. Without it, the
/// first line holding two integers is taken as `handled presented`; such
/// matches are [`MatchKind::Positional`] and callers should report them.
pub struct CallCountsExtractor {
    positional_fallback: bool,
}

impl CallCountsExtractor {
    pub fn new() -> Self {
        Self {
            positional_fallback: true,
        }
    }

    /// Set whether unlabeled integer pairs are accepted.
    pub fn with_positional_fallback(mut self, enabled: bool) -> Self {
        self.positional_fallback = enabled;
        self
    }

    fn positional(&self, text: &str) -> Vec<ExtractionMatch<CallCounts>> {
        let mut results = Vec::new();
        let mut offset = 0;

        for line in text.split_inclusive('\n') {
            // 00:05:51 is a duration, not a pair of counts
            if !CLOCK_DURATION.is_match(line) {
                if let Some(found) = pair_in(line, offset) {
                    results.push(found);
                }
            }
            offset += line.len();
        }

        results
    }
}

impl Default for CallCountsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_in(line: &str, offset: usize) -> Option<ExtractionMatch<CallCounts>> {
    let caps = INTEGER_PAIR.captures(line)?;
    let full_match = caps.get(0)?;
    let counts = CallCounts {
        handled: caps["first"].parse().ok()?,
        presented: caps["second"].parse().ok()?,
    };
    Some(
        ExtractionMatch::new(counts, MatchKind::Positional, full_match.as_str())
            .with_position(offset + full_match.start(), offset + full_match.end()),
    )
}

impl FieldExtractor for CallCountsExtractor {
    type Output = ExtractionMatch<CallCounts>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = CALLS_LABELED
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let counts = CallCounts {
                    handled: caps["handled"].parse().ok()?,
                    presented: caps["presented"].parse().ok()?,
                };
                Some(
                    ExtractionMatch::new(counts, MatchKind::Labeled, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect();

        if results.is_empty() && self.positional_fallback {
            results = self.positional(text);
        }

        results
    }
}
