//! Monthly activity extraction.

use tracing::{debug, trace};

use crate::models::report::MonthlyRecord;
use crate::report::sections::month_sections;

use super::calls::CallCountsExtractor;
use super::durations::DurationExtractor;
use super::patterns::MAX_AGENTS;
use super::policy::{FieldOutcome, MONTHLY_FIELD};
use super::FieldExtractor;

/// Extracts one [`MonthlyRecord`] per month section.
pub struct MonthlyExtractor {
    terminator: String,
    calls: CallCountsExtractor,
    durations: DurationExtractor,
}

impl MonthlyExtractor {
    /// Create an extractor whose sections stop at `terminator`.
    pub fn new(terminator: impl Into<String>) -> Self {
        Self {
            terminator: terminator.into(),
            calls: CallCountsExtractor::new(),
            durations: DurationExtractor::new(),
        }
    }

    /// Extract records in section order.
    ///
    /// Sections where nothing was found produce no record. Ambiguities are
    /// appended to `warnings`.
    pub fn extract(&self, text: &str, warnings: &mut Vec<String>) -> Vec<MonthlyRecord> {
        let mut records = Vec::new();

        for (month, section) in month_sections(text, &self.terminator) {
            let mut record = MonthlyRecord::new(month);

            let calls = self.calls.extract(section);
            if let Some(found) = &calls {
                trace!(
                    "{}: calls {:?} (confidence {:.2})",
                    month,
                    found.value,
                    found.confidence()
                );
                if found.is_positional() {
                    warnings.push(format!(
                        "{}: calls read from unlabeled values '{}'",
                        month,
                        found.source.trim()
                    ));
                }
            }
            let calls = calls.map(|found| found.value);
            record.calls_handled =
                FieldOutcome::apply(calls.map(|c| c.handled), MONTHLY_FIELD).into_option();
            record.calls_presented =
                FieldOutcome::apply(calls.map(|c| c.presented), MONTHLY_FIELD).into_option();

            let duration = self.durations.extract(section).map(|found| found.value);
            if let Some(d) = duration.filter(|d| d.hours > 0) {
                warnings.push(format!(
                    "{}: duration {:02}:{:02}:{:02} has an hour component, ignored",
                    month, d.hours, d.minutes, d.seconds
                ));
            }
            record.avg_conversation_duration = FieldOutcome::apply(
                duration.map(|d| d.minutes_within_hour()),
                MONTHLY_FIELD,
            )
            .into_option();

            let max_agents = MAX_AGENTS
                .captures(section)
                .and_then(|caps| caps["count"].parse::<u32>().ok());
            record.max_agents = FieldOutcome::apply(max_agents, MONTHLY_FIELD).into_option();

            if record.has_metrics() {
                trace!("Monthly record: {:?}", record);
                records.push(record);
            } else {
                debug!("No figures found in section {}", month);
            }
        }

        records
    }
}
