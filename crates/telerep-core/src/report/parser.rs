//! Telephony report parser assembling every extractor into one result.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::report::ParseResult;
use crate::pdf::{PdfExtractor, PdfProcessor, RawTable};

use super::rules::{AgentExtractor, MonthlyExtractor, extract_kpis, extract_resolution, extract_tickets};
use super::{ReportParser, Result};

/// Parser for monthly call-center activity reports.
///
/// Parsing either succeeds with every record set extracted, or fails as a
/// whole: [`TelephonyReportParser::parse_pdf`] never returns partial data.
#[derive(Debug, Clone, Default)]
pub struct TelephonyReportParser {
    config: ExtractionConfig,
}

impl TelephonyReportParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from an extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Enable or disable the table-based extractors.
    pub fn with_advanced_parsing(mut self, enabled: bool) -> Self {
        self.config.advanced_parsing = enabled;
        self
    }

    /// Set the agent names looked up in the text.
    pub fn with_known_agents(mut self, names: Vec<String>) -> Self {
        self.config.known_agents = names;
        self
    }

    /// Set the marker closing the last monthly section.
    pub fn with_section_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.config.section_terminator = terminator.into();
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Parse PDF bytes with the lopdf/pdf-extract backend.
    pub fn parse_pdf(&self, data: &[u8]) -> ParseResult {
        let mut extractor = PdfExtractor::new();
        self.parse_with(&mut extractor, data)
    }

    /// Parse a PDF file.
    pub fn parse_file(&self, path: &Path) -> ParseResult {
        match std::fs::read(path) {
            Ok(data) => self.parse_pdf(&data),
            Err(e) => {
                debug!("Cannot read {}: {}", path.display(), e);
                ParseResult::failure(crate::ReportError::Io(e))
            }
        }
    }

    /// Parse PDF bytes with any [`PdfProcessor`].
    ///
    /// Any failure yields a result with `parsing_success = false`, the error
    /// message and no records.
    pub fn parse_with<P: PdfProcessor>(&self, processor: &mut P, data: &[u8]) -> ParseResult {
        match self.try_parse(processor, data) {
            Ok(result) => result,
            Err(e) => {
                debug!("Report parsing failed: {}", e);
                ParseResult::failure(e)
            }
        }
    }

    fn try_parse<P: PdfProcessor>(&self, processor: &mut P, data: &[u8]) -> crate::Result<ParseResult> {
        processor.load(data)?;
        let content = processor.extract_all()?;
        Ok(self.parse_content(&content.text, &content.tables())?)
    }
}

impl ReportParser for TelephonyReportParser {
    fn parse_content(&self, text: &str, tables: &[RawTable]) -> Result<ParseResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!(
            "Parsing report from {} characters of text and {} tables",
            text.len(),
            tables.len()
        );

        if self.config.section_terminator.trim().is_empty() {
            return Err(ExtractionError::InvalidSetting {
                setting: "section_terminator".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        let agents = AgentExtractor::new(&self.config.known_agents)?;

        let monthly_data =
            MonthlyExtractor::new(self.config.section_terminator.as_str()).extract(text, &mut warnings);

        // A report with an agent table never goes through the name scan
        let agent_table = if self.config.advanced_parsing {
            agents.from_tables(tables)
        } else {
            None
        };
        let agents_data = match agent_table {
            Some(records) => records,
            None => agents.from_text(text, &mut warnings),
        };

        let kpi_data = extract_kpis(text);

        let (resolution_data, tickets_data) = if self.config.advanced_parsing {
            (extract_resolution(tables), extract_tickets(tables))
        } else {
            (Vec::new(), Vec::new())
        };

        let result = ParseResult {
            monthly_data,
            agents_data,
            kpi_data,
            resolution_data,
            tickets_data,
            parsing_success: true,
            error: None,
            warnings,
        };

        debug!(
            "Extracted {} months, {} agents, {} resolution rows, {} ticket rows in {} ms",
            result.monthly_data.len(),
            result.agents_data.len(),
            result.resolution_data.len(),
            result.tickets_data.len(),
            start.elapsed().as_millis()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::models::report::{Month, MonthlyRecord};
    use pretty_assertions::assert_eq;

    /// Processor serving fixed page texts.
    struct StaticPages(Vec<&'static str>);

    impl PdfProcessor for StaticPages {
        fn load(&mut self, _data: &[u8]) -> crate::pdf::Result<()> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            self.0.len() as u32
        }

        fn extract_page_texts(&self) -> crate::pdf::Result<Vec<String>> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }
    }

    /// Processor that opens but fails on text extraction.
    struct BrokenText;

    impl PdfProcessor for BrokenText {
        fn load(&mut self, _data: &[u8]) -> crate::pdf::Result<()> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            1
        }

        fn extract_page_texts(&self) -> crate::pdf::Result<Vec<String>> {
            Err(PdfError::TextExtraction("corrupt font".to_string()))
        }
    }

    fn assert_failed(result: &ParseResult) {
        assert!(!result.parsing_success);
        assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
        assert!(result.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_bytes_fail_whole_parse() {
        let result = TelephonyReportParser::new().parse_pdf(b"%PDF-garbage");
        assert_failed(&result);
    }

    #[test]
    fn test_extraction_failure_fails_whole_parse() {
        let result = TelephonyReportParser::new().parse_with(&mut BrokenText, b"");
        assert_failed(&result);
        assert!(result.error.unwrap().contains("corrupt font"));
    }

    #[test]
    fn test_missing_file_fails() {
        let result = TelephonyReportParser::new().parse_file(Path::new("/nonexistent/rapport.pdf"));
        assert_failed(&result);
    }

    #[test]
    fn test_invalid_agent_setting_fails() {
        let parser = TelephonyReportParser::new().with_known_agents(vec![String::new()]);
        let mut pages = StaticPages(vec!["Janvier 2025 Agents\n570 ▼ 594"]);
        assert_failed(&parser.parse_with(&mut pages, b""));
    }

    #[test]
    fn test_empty_terminator_rejected() {
        let parser = TelephonyReportParser::new().with_section_terminator(" ");
        let err = parser.parse_text("Janvier 2025 Agents").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidSetting { .. }));
    }

    #[test]
    fn test_full_pipeline() {
        let mut pages = StaticPages(vec![
            "Taux de résolution 96,5%\n\
             Janvier 2025 Agents\n\
             Appels Traités vs Présentés\n\
             570 ▼ 594\n\
             Durée Moyenne de Conversation\n\
             00:05:51\n\
             Nombre d'Agents Max\n\
             3\n",
            "Février 2025 Agents\n\
             543 ▼ 560\n\
             00:05:06\n\
             Cloture\n\
             Agent   Appels présentés   Appels traités\n\
             Fabienne Cocquart   1890   1830\n\
             Franck Paira   3   3\n\
             \n\
             Mois   N2   Appels   Appels résolus par N1   %\n\
             Janvier   24   594   570   95,96%\n\
             \n\
             Jour   Tickets N2 Janvier   Février\n\
             1   5   2\n\
             Total   5   2\n",
        ]);
        let result = TelephonyReportParser::new().parse_with(&mut pages, b"");

        assert!(result.parsing_success);
        assert_eq!(result.error, None);
        assert_eq!(
            result.monthly_data,
            vec![
                MonthlyRecord {
                    month: Month::Janvier,
                    calls_handled: Some(570),
                    calls_presented: Some(594),
                    avg_conversation_duration: Some(5.85),
                    max_agents: Some(3),
                },
                MonthlyRecord {
                    month: Month::Fevrier,
                    calls_handled: Some(543),
                    calls_presented: Some(560),
                    avg_conversation_duration: Some(5.1),
                    max_agents: None,
                },
            ]
        );
        assert_eq!(result.agents_data.len(), 2);
        assert_eq!(result.agents_data[0].calls_handled, Some(1830));
        assert_eq!(result.kpi_data.global_resolution_rate, Some(96.5));
        assert_eq!(result.resolution_data.len(), 1);
        assert_eq!(result.resolution_data[0].calls, 594);
        assert_eq!(result.tickets_data.len(), 1);
        assert_eq!(result.tickets_data[0].count(2), Some(2));
        // Février calls came from an unlabeled pair
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_agent_table_skips_text_scan() {
        let text = "FABIENNE COCQUART 1890 1830\nPHILIPPE KUBLER 1654 1598";
        let table = RawTable::from_strs(&[&["Agent", "Appels traités"], &["", ""]]);
        let result = TelephonyReportParser::new().parse_content(text, &[table]).unwrap();

        assert!(result.agents_data.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_dashboard_labels_keep_text_scan() {
        let page = "Janvier 2025 Agents\n\
                    Nombre d'Agents Max   3\n\
                    Durée Moyenne   00:05:51\n\
                    Détail agents\n\
                    FABIENNE COCQUART 1890 1830\n\
                    PHILIPPE KUBLER 1654 1598\n";

        let tables = crate::pdf::detect_tables(page);
        assert!(tables.is_empty());

        let direct = TelephonyReportParser::new().parse_content(page, &tables).unwrap();
        let mut pages = StaticPages(vec![page]);
        let result = TelephonyReportParser::new().parse_with(&mut pages, b"");
        assert_eq!(result.agents_data, direct.agents_data);

        let agents: Vec<(&str, Option<u64>, Option<u64>)> = result
            .agents_data
            .iter()
            .map(|a| (a.agent.as_str(), a.calls_presented, a.calls_handled))
            .collect();
        assert_eq!(
            agents,
            vec![
                ("FABIENNE COCQUART", Some(1890), Some(1830)),
                ("PHILIPPE KUBLER", Some(1654), Some(1598)),
            ]
        );
        assert!(result.agents_data.iter().all(|a| a.columns.is_empty()));
        assert_eq!(result.monthly_data[0].max_agents, Some(3));
    }

    #[test]
    fn test_basic_parsing_ignores_tables() {
        let text = "FABIENNE COCQUART 1890 1830";
        let tables = vec![
            RawTable::from_strs(&[&["Agent", "Appels traités"], &["Franck Paira", "3"]]),
            RawTable::from_strs(&[&["Jour", "Tickets N2"], &["1", "5"]]),
        ];
        let result = TelephonyReportParser::new()
            .with_advanced_parsing(false)
            .parse_content(text, &tables)
            .unwrap();

        assert_eq!(result.agents_data.len(), 1);
        assert_eq!(result.agents_data[0].agent, "FABIENNE COCQUART");
        assert!(result.tickets_data.is_empty());
    }

    #[test]
    fn test_empty_text_succeeds_without_records() {
        let result = TelephonyReportParser::new().parse_text("").unwrap();
        assert!(result.parsing_success);
        assert!(result.is_empty());
    }
}
