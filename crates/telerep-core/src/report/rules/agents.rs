//! Per-agent performance extraction.
//!
//! An agent table, when the report has one, is authoritative. Otherwise the
//! text is scanned for the configured agent names.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::report::AgentRecord;
use crate::pdf::{RawTable, is_blank_row};

use super::numbers::parse_count;
use super::patterns::{AGENT_HEADER, INTEGER_TOKEN};
use super::policy::{AGENT_COUNT, FieldOutcome};

/// Role of an agent table column, derived from its header.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Column {
    Agent,
    Presented,
    Handled,
    Other(String),
    Unnamed,
}

impl Column {
    fn from_header(header: Option<&str>) -> Self {
        let Some(header) = header.map(str::trim).filter(|h| !h.is_empty()) else {
            return Column::Unnamed;
        };
        let lower = header.to_lowercase();

        if header.contains(AGENT_HEADER) {
            Column::Agent
        } else if lower.contains("présent") || lower.contains("present") {
            Column::Presented
        } else if lower.contains("trait") {
            Column::Handled
        } else {
            Column::Other(header.to_string())
        }
    }
}

/// Agent extractor built from a list of known agent names.
pub struct AgentExtractor {
    names: Vec<String>,
    name_patterns: Vec<Regex>,
    any_name: Option<Regex>,
}

impl AgentExtractor {
    /// Compile the name patterns for `names`.
    pub fn new(names: &[String]) -> Result<Self, ExtractionError> {
        let names: Vec<String> = names.iter().map(|n| n.trim().to_string()).collect();
        if names.iter().any(String::is_empty) {
            return Err(ExtractionError::InvalidSetting {
                setting: "known_agents".to_string(),
                reason: "agent names must not be empty".to_string(),
            });
        }

        let name_patterns = names
            .iter()
            .map(|name| {
                RegexBuilder::new(&regex::escape(name))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ExtractionError::Pattern {
                        context: format!("agent '{}'", name),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let any_name = if names.is_empty() {
            None
        } else {
            let alternation = names
                .iter()
                .map(|name| regex::escape(name))
                .collect::<Vec<_>>()
                .join("|");
            let regex = RegexBuilder::new(&alternation)
                .case_insensitive(true)
                .build()
                .map_err(|source| ExtractionError::Pattern {
                    context: "agent name list".to_string(),
                    source,
                })?;
            Some(regex)
        };

        Ok(Self {
            names,
            name_patterns,
            any_name,
        })
    }

    /// Records from the first agent table, if the report has one.
    ///
    /// Returns `None` when no table with at least one data row has an
    /// `Agent` header cell. A matching table always wins, even if every data
    /// row is blank.
    pub fn from_tables(&self, tables: &[RawTable]) -> Option<Vec<AgentRecord>> {
        let table = tables.iter().find(|table| {
            table.len() >= 2
                && table
                    .header()
                    .is_some_and(|h| h.iter().flatten().any(|c| c.contains(AGENT_HEADER)))
        })?;

        let columns: Vec<Column> = table
            .header()
            .unwrap_or(&[])
            .iter()
            .map(|cell| Column::from_header(cell.as_deref()))
            .collect();

        let records: Vec<AgentRecord> = table
            .data_rows()
            .iter()
            .filter(|row| !is_blank_row(row))
            .map(|row| record_from_row(&columns, row))
            .collect();

        debug!("Agent table: {} records", records.len());
        Some(records)
    }

    /// Records found by scanning `text` for the known names.
    ///
    /// The figures of an agent are the first two integers between its name
    /// and the next known name: calls presented, then calls handled.
    pub fn from_text(&self, text: &str, warnings: &mut Vec<String>) -> Vec<AgentRecord> {
        let Some(any_name) = &self.any_name else {
            return Vec::new();
        };

        let mut records = Vec::new();
        for (name, pattern) in self.names.iter().zip(&self.name_patterns) {
            let Some(found) = pattern.find(text) else {
                continue;
            };

            let rest = &text[found.end()..];
            let span_end = any_name.find(rest).map(|m| m.start()).unwrap_or(rest.len());
            let numbers: Vec<u64> = INTEGER_TOKEN
                .find_iter(&rest[..span_end])
                .filter_map(|m| m.as_str().parse().ok())
                .take(2)
                .collect();

            let mut record = AgentRecord {
                agent: name.clone(),
                ..Default::default()
            };
            if let [presented, handled] = numbers[..] {
                record.calls_presented = Some(presented);
                record.calls_handled = Some(handled);
            } else {
                warnings.push(format!("{}: found without call figures", name));
            }
            records.push(record);
        }

        debug!("Agent text scan: {} records", records.len());
        records
    }
}

fn record_from_row(columns: &[Column], row: &[Option<String>]) -> AgentRecord {
    let mut record = AgentRecord::default();

    for (column, cell) in columns.iter().zip(row) {
        let Some(cell) = cell.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
            continue;
        };
        match column {
            Column::Agent => record.agent = cell.to_string(),
            Column::Presented => {
                record.calls_presented =
                    FieldOutcome::apply(parse_count(cell), AGENT_COUNT).into_option();
                if record.calls_presented.is_none() {
                    record.columns.insert("appels_presentes_brut".to_string(), cell.to_string());
                }
            }
            Column::Handled => {
                record.calls_handled =
                    FieldOutcome::apply(parse_count(cell), AGENT_COUNT).into_option();
                if record.calls_handled.is_none() {
                    record.columns.insert("appels_traites_brut".to_string(), cell.to_string());
                }
            }
            Column::Other(name) => {
                record.columns.insert(name.clone(), cell.to_string());
            }
            Column::Unnamed => {}
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ExtractionConfig;
    use pretty_assertions::assert_eq;

    fn extractor() -> AgentExtractor {
        AgentExtractor::new(&ExtractionConfig::default().known_agents).unwrap()
    }

    #[test]
    fn test_table_records() {
        let table = RawTable::from_strs(&[
            &["Agent", "Appels présentés", "Appels traités", "Taux"],
            &["Fabienne Cocquart", "1890", "1830", "96,8%"],
            &["", "", "", ""],
            &["Franck Paira", "3", "n/a"],
        ]);
        let records = extractor().from_tables(&[table]).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].agent, "Fabienne Cocquart");
        assert_eq!(records[0].calls_presented, Some(1890));
        assert_eq!(records[0].calls_handled, Some(1830));
        assert_eq!(records[0].columns.get("Taux").map(String::as_str), Some("96,8%"));
        assert_eq!(records[1].calls_handled, None);
        assert_eq!(
            records[1].columns.get("appels_traites_brut").map(String::as_str),
            Some("n/a")
        );
    }

    #[test]
    fn test_first_agent_table_only() {
        let other = RawTable::from_strs(&[&["Jour", "Tickets N2"], &["1", "5"]]);
        let header_only = RawTable::from_strs(&[&["Agent", "Appels"]]);
        let first = RawTable::from_strs(&[&["Agent", "Appels"], &["A", "1"]]);
        let second = RawTable::from_strs(&[&["Agent", "Appels"], &["B", "2"], &["C", "3"]]);

        let records = extractor()
            .from_tables(&[other, header_only, first, second])
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].agent, "A");
        assert!(extractor().from_tables(&[]).is_none());
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        let table = RawTable::from_strs(&[&["agent", "appels"], &["A", "1"]]);
        assert!(extractor().from_tables(&[table]).is_none());
    }

    #[test]
    fn test_text_scan() {
        let text = "Détail\nFABIENNE COCQUART 1890 1830\nphilippe kubler 1654\n1598\nFranck PAIRA\n";
        let mut warnings = Vec::new();
        let records = extractor().from_text(text, &mut warnings);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].agent, "FABIENNE COCQUART");
        assert_eq!(records[0].calls_presented, Some(1890));
        assert_eq!(records[0].calls_handled, Some(1830));
        assert_eq!(records[1].calls_presented, Some(1654));
        assert_eq!(records[1].calls_handled, Some(1598));
        assert_eq!(records[2].agent, "Franck PAIRA");
        assert_eq!(records[2].calls_presented, None);
        assert_eq!(warnings, vec!["Franck PAIRA: found without call figures".to_string()]);
    }

    #[test]
    fn test_span_stops_at_next_name() {
        let text = "Sebastien SIE 15 Franck PAIRA 3 3";
        let mut warnings = Vec::new();
        let records = extractor().from_text(text, &mut warnings);

        let sie = records.iter().find(|r| r.agent == "Sebastien SIE").unwrap();
        assert_eq!(sie.calls_presented, None);
        let paira = records.iter().find(|r| r.agent == "Franck PAIRA").unwrap();
        assert_eq!(paira.calls_handled, Some(3));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_names_are_escaped() {
        let extractor = AgentExtractor::new(&["J. (Intérim)".to_string()]).unwrap();
        let mut warnings = Vec::new();
        let records = extractor.from_text("J. (Intérim) 4 4", &mut warnings);
        assert_eq!(records[0].calls_handled, Some(4));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = AgentExtractor::new(&["  ".to_string()]).err().unwrap();
        assert!(matches!(err, ExtractionError::InvalidSetting { .. }));
    }

    #[test]
    fn test_no_names_no_records() {
        let extractor = AgentExtractor::new(&[]).unwrap();
        let mut warnings = Vec::new();
        assert!(extractor.from_text("FABIENNE COCQUART 1 2", &mut warnings).is_empty());
    }
}
