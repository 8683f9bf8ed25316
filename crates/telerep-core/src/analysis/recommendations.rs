//! Executive key points, recommendations and performance score.

use crate::models::config::AnalysisConfig;
use crate::models::report::ParseResult;
use crate::report::rules::format_number_french;

use super::summary::{SummaryStatistics, mean, sample_std_dev};
use super::trends::half_growth;

/// Rate (percent) from which the key points call resolution excellent.
const KEY_POINT_EXCELLENT_RATE: f64 = 95.0;
/// Longest conversation (minutes) still called optimal.
const OPTIMAL_DURATION: f64 = 5.0;
/// Volume growth (percent) above which the trend is not stable.
const VOLUME_TREND_BAND: f64 = 5.0;
const LONG_DURATION: f64 = 6.0;
const SHORT_DURATION: f64 = 3.0;
/// Std deviation of the agent count above which staffing is unstable.
const STAFFING_STD_DEV: f64 = 1.0;
/// Coefficient of variation of handled calls above which workload is uneven.
const WORKLOAD_VARIATION: f64 = 0.5;

/// Key points of the executive summary.
pub fn key_points(result: &ParseResult, summary: &SummaryStatistics, config: &AnalysisConfig) -> Vec<String> {
    let mut points = Vec::new();

    if summary.total_calls_presented > 0 {
        points.push(format!(
            "Volume total de {} appels présentés sur la période",
            format_number_french(summary.total_calls_presented as f64)
        ));
    }

    if let Some(rate) = summary.computed_resolution_rate {
        if rate >= KEY_POINT_EXCELLENT_RATE {
            points.push(format!("Excellent taux de résolution de {:.1}% (objectif dépassé)", rate));
        } else if rate >= config.resolution_alert_threshold {
            points.push(format!("Bon taux de résolution de {:.1}% (proche de l'objectif)", rate));
        } else {
            points.push(format!("Taux de résolution de {:.1}% nécessite une attention", rate));
        }
    }

    if let Some(duration) = summary.mean_conversation_duration {
        if duration <= OPTIMAL_DURATION {
            points.push("Durée moyenne de conversation optimale (≤5 min)".to_string());
        } else {
            points.push(format!("Durée moyenne de {:.1} min peut être optimisée", duration));
        }
    }

    let volume: Vec<f64> = result
        .monthly_data
        .iter()
        .filter_map(|m| m.calls_handled)
        .map(|v| v as f64)
        .collect();
    if volume.len() > 1 {
        let evolution = half_growth(&volume);
        if evolution > VOLUME_TREND_BAND {
            points.push(format!("Tendance positive du volume d'appels (+{:.1}%)", evolution));
        } else if evolution < -VOLUME_TREND_BAND {
            points.push(format!("Tendance négative du volume d'appels ({:.1}%)", evolution));
        } else {
            points.push("Volume d'appels stable sur la période".to_string());
        }
    }

    points
}

/// Recommendations derived from the report figures.
///
/// Falls back to general advice when no rule fires.
pub fn recommendations(result: &ParseResult, summary: &SummaryStatistics, config: &AnalysisConfig) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(rate) = summary.computed_resolution_rate {
        if rate < config.resolution_alert_threshold {
            recommendations.push("Améliorer le taux de résolution par formation complémentaire".to_string());
            recommendations.push("Analyser les causes de non-résolution des appels".to_string());
        }
        if rate > config.resolution_excellent_threshold {
            recommendations.push("Optimiser les processus pour maintenir l'excellence".to_string());
        }
    }

    if let Some(duration) = summary.mean_conversation_duration {
        if duration > LONG_DURATION {
            recommendations.push("Réduire la durée moyenne par optimisation des scripts".to_string());
            recommendations.push("Former les agents aux techniques de communication efficace".to_string());
        } else if duration < SHORT_DURATION {
            recommendations.push("Vérifier la qualité du service malgré la rapidité".to_string());
        }
    }

    let staffing: Vec<f64> = result
        .monthly_data
        .iter()
        .filter_map(|m| m.max_agents)
        .map(f64::from)
        .collect();
    if sample_std_dev(&staffing).is_some_and(|std| std > STAFFING_STD_DEV) {
        recommendations.push("Stabiliser l'effectif pour une meilleure prévisibilité".to_string());
    }

    let workload: Vec<f64> = result
        .agents_data
        .iter()
        .filter_map(|a| a.calls_handled)
        .map(|v| v as f64)
        .collect();
    let variation = sample_std_dev(&workload)
        .zip(mean(&workload))
        .filter(|(_, avg)| *avg > 0.0)
        .map(|(std, avg)| std / avg);
    if variation.is_some_and(|cv| cv > WORKLOAD_VARIATION) {
        recommendations.push("Équilibrer la charge de travail entre agents".to_string());
        recommendations.push("Identifier et partager les bonnes pratiques".to_string());
    }

    if recommendations.is_empty() {
        recommendations.extend([
            "Maintenir le niveau de performance actuel".to_string(),
            "Continuer le monitoring régulier des indicateurs".to_string(),
            "Planifier des sessions de formation continue".to_string(),
        ]);
    }

    recommendations
}

/// Global performance score (0-100).
///
/// Weighted 50% resolution rate, 30% efficiency (full marks at 3 minutes,
/// minus 10 points per extra minute) and 20% volume (full marks from 1000
/// calls).
pub fn performance_score(resolution_rate: f64, avg_duration: f64, volume: u64) -> f64 {
    let resolution = resolution_rate.min(100.0);
    let efficiency = (100.0 - (avg_duration - 3.0) * 10.0).max(0.0);
    let volume = (volume as f64 / 10.0).min(100.0);

    (resolution * 0.5 + efficiency * 0.3 + volume * 0.2).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summary::summarize;
    use crate::models::report::{AgentRecord, Month, MonthlyRecord};
    use crate::models::sample::sample_report;
    use pretty_assertions::assert_eq;

    fn report(months: &[(u64, u64, f64, u32)]) -> ParseResult {
        let monthly_data = months
            .iter()
            .zip(Month::ALL)
            .map(|(&(handled, presented, duration, agents), month)| MonthlyRecord {
                month,
                calls_handled: Some(handled),
                calls_presented: Some(presented),
                avg_conversation_duration: Some(duration),
                max_agents: Some(agents),
            })
            .collect();
        ParseResult {
            monthly_data,
            parsing_success: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_sample_key_points() {
        let result = sample_report();
        let summary = summarize(&result);
        let points = key_points(&result, &summary, &AnalysisConfig::default());

        assert_eq!(
            points,
            vec![
                "Volume total de 4 352 appels présentés sur la période".to_string(),
                "Excellent taux de résolution de 96.8% (objectif dépassé)".to_string(),
                "Durée moyenne de 5.2 min peut être optimisée".to_string(),
                "Tendance négative du volume d'appels (-16.0%)".to_string(),
            ]
        );
    }

    #[test]
    fn test_sample_recommendations() {
        let result = sample_report();
        let summary = summarize(&result);
        let recs = recommendations(&result, &summary, &AnalysisConfig::default());

        assert_eq!(
            recs,
            vec![
                "Stabiliser l'effectif pour une meilleure prévisibilité".to_string(),
                "Équilibrer la charge de travail entre agents".to_string(),
                "Identifier et partager les bonnes pratiques".to_string(),
            ]
        );
    }

    #[test]
    fn test_low_resolution_and_long_calls() {
        let result = report(&[(80, 100, 7.0, 2), (85, 100, 6.5, 2)]);
        let summary = summarize(&result);
        let recs = recommendations(&result, &summary, &AnalysisConfig::default());

        assert_eq!(recs.len(), 4);
        assert!(recs[0].starts_with("Améliorer"));
        assert!(recs[2].starts_with("Réduire"));

        let points = key_points(&result, &summary, &AnalysisConfig::default());
        assert!(points[1].ends_with("nécessite une attention"));
    }

    #[test]
    fn test_default_recommendations() {
        let mut result = report(&[(95, 100, 4.0, 2), (96, 100, 4.0, 2)]);
        result.agents_data = vec![
            AgentRecord {
                agent: "A".to_string(),
                calls_handled: Some(100),
                ..Default::default()
            },
            AgentRecord {
                agent: "B".to_string(),
                calls_handled: Some(110),
                ..Default::default()
            },
        ];
        let summary = summarize(&result);
        let recs = recommendations(&result, &summary, &AnalysisConfig::default());

        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0], "Maintenir le niveau de performance actuel");
    }

    #[test]
    fn test_thresholds_come_from_config() {
        let result = report(&[(95, 100, 4.0, 2), (96, 100, 4.0, 2)]);
        let summary = summarize(&result);
        let config = AnalysisConfig {
            resolution_excellent_threshold: 95.0,
            ..Default::default()
        };
        let recs = recommendations(&result, &summary, &config);
        assert_eq!(recs, vec!["Optimiser les processus pour maintenir l'excellence".to_string()]);
    }

    #[test]
    fn test_performance_score() {
        assert_eq!(performance_score(100.0, 3.0, 1000), 100.0);
        assert!((performance_score(90.0, 5.0, 500) - 79.0).abs() < 1e-9);
        assert!((performance_score(50.0, 20.0, 0) - 25.0).abs() < 1e-9);
    }
}
