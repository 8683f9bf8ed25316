//! Configuration structures for report parsing and analysis.

use serde::{Deserialize, Serialize};

/// Main configuration for the telerep pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// KPI analysis configuration.
    pub analysis: AnalysisConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Run the table-based extractors (agent table, N1 resolution, N2 tickets).
    ///
    /// When disabled only the text-based extractors run.
    pub advanced_parsing: bool,

    /// Agent names looked up by the text-scan fallback.
    pub known_agents: Vec<String>,

    /// Literal marker that closes the last monthly section.
    pub section_terminator: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            advanced_parsing: true,
            known_agents: vec![
                "FABIENNE COCQUART".to_string(),
                "PHILIPPE KUBLER".to_string(),
                "Sebastien SIE".to_string(),
                "Franck PAIRA".to_string(),
            ],
            section_terminator: "Cloture".to_string(),
        }
    }
}

/// KPI analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Compute first-half/second-half trend indicators.
    pub include_trends: bool,

    /// Generate recommendations from the computed KPIs.
    pub include_recommendations: bool,

    /// Resolution rate (percent) under which the report raises an alert.
    pub resolution_alert_threshold: f64,

    /// Resolution rate (percent) above which performance is flagged excellent.
    pub resolution_excellent_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            include_trends: true,
            include_recommendations: true,
            resolution_alert_threshold: 90.0,
            resolution_excellent_threshold: 98.0,
        }
    }
}

impl ReportConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
