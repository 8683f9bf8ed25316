//! Aggregate statistics over a parsed report.

use serde::{Deserialize, Serialize};

use crate::models::report::{AgentRecord, ParseResult};

/// Totals, means and ratios of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    #[serde(rename = "total_appels_presentes")]
    pub total_calls_presented: u64,

    #[serde(rename = "total_appels_traites")]
    pub total_calls_handled: u64,

    /// Mean of the monthly average durations, in minutes.
    #[serde(rename = "duree_moyenne_globale", skip_serializing_if = "Option::is_none")]
    pub mean_conversation_duration: Option<f64>,

    /// Handled / presented over the whole period, in percent.
    #[serde(rename = "taux_resolution_calcule", skip_serializing_if = "Option::is_none")]
    pub computed_resolution_rate: Option<f64>,

    #[serde(rename = "nombre_agents_actifs")]
    pub active_agents: usize,

    /// Agent with the most presented calls.
    #[serde(rename = "agent_le_plus_actif", skip_serializing_if = "Option::is_none")]
    pub most_active_agent: Option<String>,

    #[serde(rename = "periode_couverte")]
    pub months_covered: usize,
}

/// Compute the summary statistics of a report.
pub fn summarize(result: &ParseResult) -> SummaryStatistics {
    let monthly = &result.monthly_data;

    let total_calls_presented = monthly.iter().filter_map(|m| m.calls_presented).sum();
    let total_calls_handled = monthly.iter().filter_map(|m| m.calls_handled).sum();

    let durations: Vec<f64> = monthly
        .iter()
        .filter_map(|m| m.avg_conversation_duration)
        .collect();

    let computed_resolution_rate = (total_calls_presented > 0)
        .then(|| total_calls_handled as f64 / total_calls_presented as f64 * 100.0);

    SummaryStatistics {
        total_calls_presented,
        total_calls_handled,
        mean_conversation_duration: mean(&durations),
        computed_resolution_rate,
        active_agents: result.agents_data.len(),
        most_active_agent: most_active(&result.agents_data),
        months_covered: monthly.len(),
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation, `None` with fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

// First agent wins on ties
fn most_active(agents: &[AgentRecord]) -> Option<String> {
    let mut best: Option<(&AgentRecord, u64)> = None;
    for agent in agents {
        let Some(presented) = agent.calls_presented else {
            continue;
        };
        if best.is_none_or(|(_, top)| presented > top) {
            best = Some((agent, presented));
        }
    }
    best.map(|(agent, _)| agent.agent.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample::sample_report;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_summary() {
        let summary = summarize(&sample_report());

        assert_eq!(summary.total_calls_presented, 4352);
        assert_eq!(summary.total_calls_handled, 4211);
        assert_eq!(summary.months_covered, 8);
        assert_eq!(summary.active_agents, 4);
        assert_eq!(summary.most_active_agent.as_deref(), Some("Fabienne Cocquart"));

        let rate = summary.computed_resolution_rate.unwrap();
        assert!((rate - 96.76).abs() < 0.01);
        let duration = summary.mean_conversation_duration.unwrap();
        assert!((duration - 5.21625).abs() < 1e-9);
    }

    #[test]
    fn test_empty_report() {
        let summary = summarize(&ParseResult::default());
        assert_eq!(summary, SummaryStatistics::default());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "total_appels_presentes": 0,
                "total_appels_traites": 0,
                "nombre_agents_actifs": 0,
                "periode_couverte": 0
            })
        );
    }

    #[test]
    fn test_most_active_tie_keeps_first() {
        let agents = vec![
            AgentRecord {
                agent: "A".to_string(),
                calls_presented: Some(10),
                ..Default::default()
            },
            AgentRecord {
                agent: "B".to_string(),
                calls_presented: Some(10),
                ..Default::default()
            },
            AgentRecord {
                agent: "C".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(most_active(&agents).as_deref(), Some("A"));
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(sample_std_dev(&[1.0]), None);
        assert_eq!(sample_std_dev(&[2.0, 4.0]), Some(2.0f64.sqrt()));
    }
}
