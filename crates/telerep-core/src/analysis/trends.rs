//! First-half versus second-half trend indicators.

use serde::{Deserialize, Serialize};

use crate::models::report::{Month, MonthlyRecord};

use super::summary::mean;

/// Trend of each monthly indicator, comparing the first and second half of
/// the period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendIndicators {
    /// Growth of handled calls, in percent.
    pub volume_trend: f64,
    /// Change of the resolution rate, in percentage points.
    pub quality_trend: f64,
    /// Reduction of the conversation duration, in percent (positive is faster).
    pub efficiency_trend: f64,
    /// Growth of the maximum agent count, in percent.
    pub resources_trend: f64,
}

/// Resolution rate of one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthRate {
    pub month: Month,
    pub rate: f64,
}

/// Growth from `previous` to `current` in percent; 0 when `previous` is 0.
pub fn calculate_growth_rate(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// Means of the first and second half of a series.
///
/// With an odd length the middle value belongs to the second half.
fn half_means(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    let (first, second) = values.split_at(values.len() / 2);
    Some((mean(first)?, mean(second)?))
}

/// Growth between the two halves of a series, in percent.
pub fn half_growth(values: &[f64]) -> f64 {
    half_means(values)
        .map(|(first, second)| calculate_growth_rate(second, first))
        .unwrap_or(0.0)
}

fn series(records: &[MonthlyRecord], field: impl Fn(&MonthlyRecord) -> Option<f64>) -> Vec<f64> {
    records.iter().filter_map(field).collect()
}

/// Monthly resolution rates, for months with both call counts.
pub fn monthly_rates(records: &[MonthlyRecord]) -> Vec<MonthRate> {
    records
        .iter()
        .filter_map(|r| {
            Some(MonthRate {
                month: r.month,
                rate: r.resolution_rate()?,
            })
        })
        .collect()
}

/// Compute the trend indicators. All zero with fewer than two months.
pub fn calculate_trends(records: &[MonthlyRecord]) -> TrendIndicators {
    if records.len() < 2 {
        return TrendIndicators::default();
    }

    let volume = series(records, |r| r.calls_handled.map(|v| v as f64));
    let rates: Vec<f64> = monthly_rates(records).iter().map(|m| m.rate).collect();
    let durations = series(records, |r| r.avg_conversation_duration);
    let agents = series(records, |r| r.max_agents.map(f64::from));

    TrendIndicators {
        volume_trend: half_growth(&volume),
        quality_trend: half_means(&rates)
            .map(|(first, second)| second - first)
            .unwrap_or(0.0),
        efficiency_trend: -half_growth(&durations),
        resources_trend: half_growth(&agents),
    }
}

/// Months with the highest and the lowest resolution rate.
///
/// The earliest month wins on ties.
pub fn best_and_worst_month(records: &[MonthlyRecord]) -> Option<(MonthRate, MonthRate)> {
    let rates = monthly_rates(records);
    let first = *rates.first()?;

    let (best, worst) = rates.iter().skip(1).fold((first, first), |(best, worst), m| {
        (
            if m.rate > best.rate { *m } else { best },
            if m.rate < worst.rate { *m } else { worst },
        )
    });
    Some((best, worst))
}

/// Sentences describing how the resolution rate evolved over the period.
pub fn resolution_evolution(records: &[MonthlyRecord]) -> Vec<String> {
    let mut points = Vec::new();

    let Some((best, worst)) = best_and_worst_month(records) else {
        return points;
    };
    points.push(format!("Meilleur mois: {} ({:.1}%)", best.month, best.rate));
    points.push(format!("Mois le plus difficile: {} ({:.1}%)", worst.month, worst.rate));

    let rates: Vec<f64> = monthly_rates(records).iter().map(|m| m.rate).collect();
    if rates.len() > 2 {
        let trend = half_growth(&rates);
        if trend > 1.0 {
            points.push("Tendance d'amélioration continue".to_string());
        } else if trend < -1.0 {
            points.push("Attention: tendance de dégradation".to_string());
        } else {
            points.push("Performance stable".to_string());
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn month(month: Month, handled: u64, presented: u64, duration: f64, agents: u32) -> MonthlyRecord {
        MonthlyRecord {
            month,
            calls_handled: Some(handled),
            calls_presented: Some(presented),
            avg_conversation_duration: Some(duration),
            max_agents: Some(agents),
        }
    }

    #[test]
    fn test_growth_rate() {
        assert_eq!(calculate_growth_rate(110.0, 100.0), 10.0);
        assert_eq!(calculate_growth_rate(50.0, 100.0), -50.0);
        assert_eq!(calculate_growth_rate(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_trends() {
        let records = vec![
            month(Month::Janvier, 100, 100, 5.0, 2),
            month(Month::Fevrier, 80, 100, 4.0, 2),
            month(Month::Mars, 120, 120, 4.0, 4),
            month(Month::Avril, 100, 125, 5.0, 4),
        ];
        let trends = calculate_trends(&records);

        // halves: 90 -> 110 handled
        assert!((trends.volume_trend - 22.222).abs() < 0.01);
        // rates: (100 + 80) / 2 -> (100 + 80) / 2
        assert!(trends.quality_trend.abs() < 1e-9);
        assert_eq!(trends.efficiency_trend, 0.0);
        assert_eq!(trends.resources_trend, 100.0);
    }

    #[test]
    fn test_trends_need_two_months() {
        let records = vec![month(Month::Mai, 1, 2, 3.0, 1)];
        assert_eq!(calculate_trends(&records), TrendIndicators::default());
    }

    #[test]
    fn test_odd_length_halves() {
        assert_eq!(half_growth(&[100.0, 100.0, 200.0]), 50.0);
        assert_eq!(half_growth(&[1.0]), 0.0);
    }

    #[test]
    fn test_best_and_worst() {
        let records = vec![
            month(Month::Janvier, 90, 100, 5.0, 1),
            month(Month::Fevrier, 99, 100, 5.0, 1),
            month(Month::Mars, 80, 100, 5.0, 1),
            month(Month::Avril, 99, 100, 5.0, 1),
        ];
        let (best, worst) = best_and_worst_month(&records).unwrap();
        assert_eq!(best.month, Month::Fevrier);
        assert_eq!(worst.month, Month::Mars);

        let points = resolution_evolution(&records);
        assert_eq!(points[0], "Meilleur mois: Février (99.0%)");
        assert_eq!(points[1], "Mois le plus difficile: Mars (80.0%)");
        assert_eq!(points[2], "Attention: tendance de dégradation");
    }

    #[test]
    fn test_no_rates_no_evolution() {
        let records = vec![MonthlyRecord::new(Month::Juin)];
        assert!(best_and_worst_month(&records).is_none());
        assert!(resolution_evolution(&records).is_empty());
    }
}
