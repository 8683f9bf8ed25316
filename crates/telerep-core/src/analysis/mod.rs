//! KPI analysis of parsed reports.

pub mod recommendations;
pub mod summary;
pub mod trends;

pub use recommendations::{key_points, performance_score, recommendations};
pub use summary::{SummaryStatistics, summarize};
pub use trends::{MonthRate, TrendIndicators, calculate_growth_rate, calculate_trends};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::config::AnalysisConfig;
use crate::models::report::ParseResult;

/// Derived view of a parsed report, attached to CLI output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportAnalysis {
    pub summary: SummaryStatistics,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<TrendIndicators>,

    pub key_points: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resolution_evolution: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<f64>,
}

/// Analyze a parse result.
pub fn analyze(result: &ParseResult, config: &AnalysisConfig) -> ReportAnalysis {
    let summary = summarize(result);

    let trends = config
        .include_trends
        .then(|| calculate_trends(&result.monthly_data));

    let recommendations = if config.include_recommendations {
        recommendations(result, &summary, config)
    } else {
        Vec::new()
    };

    let performance_score = summary
        .computed_resolution_rate
        .zip(summary.mean_conversation_duration)
        .map(|(rate, duration)| performance_score(rate, duration, summary.total_calls_handled));

    debug!(
        "Analysis: {} months, score {:?}",
        summary.months_covered, performance_score
    );

    ReportAnalysis {
        key_points: key_points(result, &summary, config),
        resolution_evolution: trends::resolution_evolution(&result.monthly_data),
        summary,
        trends,
        recommendations,
        performance_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample::sample_report;

    #[test]
    fn test_analyze_sample() {
        let analysis = analyze(&sample_report(), &AnalysisConfig::default());

        assert_eq!(analysis.summary.months_covered, 8);
        assert!(analysis.trends.unwrap().volume_trend < 0.0);
        assert_eq!(analysis.key_points.len(), 4);
        assert_eq!(analysis.recommendations.len(), 3);
        assert_eq!(analysis.resolution_evolution.len(), 3);

        let score = analysis.performance_score.unwrap();
        assert!(score > 0.0 && score <= 100.0);
    }

    #[test]
    fn test_toggles() {
        let config = AnalysisConfig {
            include_trends: false,
            include_recommendations: false,
            ..Default::default()
        };
        let analysis = analyze(&sample_report(), &config);

        assert!(analysis.trends.is_none());
        assert!(analysis.recommendations.is_empty());
        assert!(!analysis.key_points.is_empty());
    }

    #[test]
    fn test_analyze_failure() {
        let analysis = analyze(&ParseResult::failure("boom"), &AnalysisConfig::default());
        assert_eq!(analysis.performance_score, None);
        assert!(analysis.key_points.is_empty());
        assert_eq!(analysis.trends, Some(TrendIndicators::default()));
    }
}
