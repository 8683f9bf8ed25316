//! Global KPI extraction.

use crate::models::report::KpiRecord;

use super::numbers::parse_french_decimal;
use super::patterns::{MONTHLY_AVERAGES, PERCENTAGE};

/// Extract the global indicators from the full report text.
///
/// The first percentage of the document is the global resolution rate.
/// Missing indicators stay `None`.
pub fn extract_kpis(text: &str) -> KpiRecord {
    let mut kpi = KpiRecord::default();

    if let Some(caps) = PERCENTAGE.captures(text) {
        kpi.global_resolution_rate = parse_french_decimal(&caps["value"]);
    }

    if let Some(caps) = MONTHLY_AVERAGES.captures(text) {
        kpi.monthly_avg_received = parse_french_decimal(&caps["received"]);
        kpi.monthly_avg_resolved = parse_french_decimal(&caps["resolved"]);
    }

    kpi
}
