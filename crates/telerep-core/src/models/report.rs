//! Report data models.
//!
//! Serialized field names are French and form the contract with the
//! charting, slide-deck and spreadsheet consumers. Do not rename them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Calendar month of a report section.
///
/// Serializes to the canonical French month name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Janvier,
    #[serde(rename = "Février", alias = "Fevrier")]
    Fevrier,
    Mars,
    Avril,
    Mai,
    Juin,
    Juillet,
    #[serde(rename = "Août", alias = "Aout")]
    Aout,
    Septembre,
    Octobre,
    Novembre,
    #[serde(rename = "Décembre", alias = "Decembre")]
    Decembre,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Janvier,
        Month::Fevrier,
        Month::Mars,
        Month::Avril,
        Month::Mai,
        Month::Juin,
        Month::Juillet,
        Month::Aout,
        Month::Septembre,
        Month::Octobre,
        Month::Novembre,
        Month::Decembre,
    ];

    /// Canonical French name.
    pub fn name(self) -> &'static str {
        match self {
            Month::Janvier => "Janvier",
            Month::Fevrier => "Février",
            Month::Mars => "Mars",
            Month::Avril => "Avril",
            Month::Mai => "Mai",
            Month::Juin => "Juin",
            Month::Juillet => "Juillet",
            Month::Aout => "Août",
            Month::Septembre => "Septembre",
            Month::Octobre => "Octobre",
            Month::Novembre => "Novembre",
            Month::Decembre => "Décembre",
        }
    }

    /// Month number (1-12).
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Resolve a month from its French (with or without accents) or English name.
    pub fn from_name(name: &str) -> Option<Self> {
        let month = match name.trim().to_lowercase().as_str() {
            "janvier" | "january" => Month::Janvier,
            "février" | "fevrier" | "february" => Month::Fevrier,
            "mars" | "march" => Month::Mars,
            "avril" | "april" => Month::Avril,
            "mai" | "may" => Month::Mai,
            "juin" | "june" => Month::Juin,
            "juillet" | "july" => Month::Juillet,
            "août" | "aout" | "august" => Month::Aout,
            "septembre" | "september" => Month::Septembre,
            "octobre" | "october" => Month::Octobre,
            "novembre" | "november" => Month::Novembre,
            "décembre" | "decembre" | "december" => Month::Decembre,
            _ => return None,
        };
        Some(month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Activity figures for one monthly section of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Month of the section.
    #[serde(rename = "mois")]
    pub month: Month,

    /// Calls handled by the agents.
    #[serde(rename = "appels_traites", default, skip_serializing_if = "Option::is_none")]
    pub calls_handled: Option<u64>,

    /// Calls presented to the agents.
    #[serde(rename = "appels_presentes", default, skip_serializing_if = "Option::is_none")]
    pub calls_presented: Option<u64>,

    /// Average conversation duration in minutes, rounded to 2 decimals.
    #[serde(rename = "duree_moyenne_conv", default, skip_serializing_if = "Option::is_none")]
    pub avg_conversation_duration: Option<f64>,

    /// Maximum number of simultaneously logged agents.
    #[serde(rename = "nb_agents_max", default, skip_serializing_if = "Option::is_none")]
    pub max_agents: Option<u32>,
}

impl MonthlyRecord {
    /// Create an empty record for a month.
    pub fn new(month: Month) -> Self {
        Self {
            month,
            calls_handled: None,
            calls_presented: None,
            avg_conversation_duration: None,
            max_agents: None,
        }
    }

    /// Whether any field beyond the month was extracted.
    pub fn has_metrics(&self) -> bool {
        self.calls_handled.is_some()
            || self.calls_presented.is_some()
            || self.avg_conversation_duration.is_some()
            || self.max_agents.is_some()
    }

    /// Handled / presented ratio in percent.
    pub fn resolution_rate(&self) -> Option<f64> {
        match (self.calls_handled, self.calls_presented) {
            (Some(handled), Some(presented)) if presented > 0 => {
                Some(handled as f64 / presented as f64 * 100.0)
            }
            _ => None,
        }
    }
}

/// Per-agent performance figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Agent name.
    #[serde(default)]
    pub agent: String,

    /// Calls presented to the agent.
    #[serde(rename = "appels_presentes", default, skip_serializing_if = "Option::is_none")]
    pub calls_presented: Option<u64>,

    /// Calls handled by the agent.
    #[serde(rename = "appels_traites", default, skip_serializing_if = "Option::is_none")]
    pub calls_handled: Option<u64>,

    /// Remaining header-to-cell pairs of an agent table.
    #[serde(flatten)]
    pub columns: BTreeMap<String, String>,
}

/// Global indicators extracted independently of the monthly sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiRecord {
    /// Overall resolution rate in percent.
    #[serde(rename = "taux_resolution_global", default, skip_serializing_if = "Option::is_none")]
    pub global_resolution_rate: Option<f64>,

    /// Monthly average of received calls.
    #[serde(rename = "moyenne_appels_recus", default, skip_serializing_if = "Option::is_none")]
    pub monthly_avg_received: Option<f64>,

    /// Monthly average of resolved calls.
    #[serde(rename = "moyenne_appels_resolus", default, skip_serializing_if = "Option::is_none")]
    pub monthly_avg_resolved: Option<f64>,
}

impl KpiRecord {
    pub fn is_empty(&self) -> bool {
        self.global_resolution_rate.is_none()
            && self.monthly_avg_received.is_none()
            && self.monthly_avg_resolved.is_none()
    }
}

/// One row of the "résolus par N1" table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    /// 1-based index of the data row.
    #[serde(rename = "mois")]
    pub index: u32,

    /// Calls escalated to N2.
    pub n2: u64,

    /// Calls received.
    #[serde(rename = "appels")]
    pub calls: u64,

    /// Calls resolved by N1.
    #[serde(rename = "resolus_n1")]
    pub resolved_n1: u64,

    /// N1 resolution percentage.
    #[serde(rename = "pourcentage")]
    pub percentage: f64,
}

/// One day-of-month row of the "Tickets N2" table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    /// Day of month (always positive).
    #[serde(rename = "jour")]
    pub day: u32,

    /// Ticket counts keyed `mois_N`, one per numeric month column.
    #[serde(flatten)]
    pub counts: BTreeMap<String, u64>,
}

impl TicketRecord {
    /// Serialized key of the `n`-th month column.
    pub fn month_key(n: usize) -> String {
        format!("mois_{}", n)
    }

    /// Ticket count of the `n`-th month column, if present.
    pub fn count(&self, n: usize) -> Option<u64> {
        self.counts.get(&Self::month_key(n)).copied()
    }
}

/// Complete output of one parse invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub monthly_data: Vec<MonthlyRecord>,
    pub agents_data: Vec<AgentRecord>,
    pub kpi_data: KpiRecord,
    pub resolution_data: Vec<ResolutionRecord>,
    pub tickets_data: Vec<TicketRecord>,
    pub parsing_success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Ambiguities met during extraction (positional fallbacks, discarded values).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ParseResult {
    /// A failed parse: no record is populated.
    pub fn failure(error: impl fmt::Display) -> Self {
        let mut message = error.to_string();
        if message.is_empty() {
            message = "unknown parsing failure".to_string();
        }
        Self {
            parsing_success: false,
            error: Some(message),
            ..Self::default()
        }
    }

    /// Whether no record of any kind was extracted.
    pub fn is_empty(&self) -> bool {
        self.monthly_data.is_empty()
            && self.agents_data.is_empty()
            && self.kpi_data.is_empty()
            && self.resolution_data.is_empty()
            && self.tickets_data.is_empty()
    }
}
