//! Output formatting shared by `process` and `batch`.

use serde::Serialize;

use telerep_core::ReportAnalysis;
use telerep_core::models::report::{ParseResult, TicketRecord};
use telerep_core::report::rules::{format_duration, format_number_french};

/// Number of month columns of the tickets export.
const TICKET_MONTHS: usize = 8;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV export of one record set
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Record set exported by the CSV format.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum Dataset {
    /// Monthly activity
    #[default]
    Monthly,
    /// Per-agent figures
    Agents,
    /// N1 resolution table
    Resolution,
    /// N2 tickets per day
    Tickets,
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    #[serde(flatten)]
    report: &'a ParseResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<&'a ReportAnalysis>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    sample_data: bool,
}

/// Render a report in the requested format.
pub fn format_report(
    result: &ParseResult,
    analysis: Option<&ReportAnalysis>,
    format: OutputFormat,
    dataset: Dataset,
    sample_data: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&ReportOutput {
            report: result,
            analysis,
            sample_data,
        })?),
        OutputFormat::Csv => format_csv(result, dataset),
        OutputFormat::Text => Ok(format_text(result, analysis, sample_data)),
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn format_csv(result: &ParseResult, dataset: Dataset) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    match dataset {
        Dataset::Monthly => {
            wtr.write_record([
                "mois",
                "appels_traites",
                "appels_presentes",
                "duree_moyenne_conv",
                "nb_agents_max",
            ])?;
            for record in &result.monthly_data {
                wtr.write_record([
                    record.month.name().to_string(),
                    opt(record.calls_handled),
                    opt(record.calls_presented),
                    opt(record.avg_conversation_duration),
                    opt(record.max_agents),
                ])?;
            }
        }
        Dataset::Agents => {
            let mut extra: Vec<&String> = result
                .agents_data
                .iter()
                .flat_map(|a| a.columns.keys())
                .collect();
            extra.sort();
            extra.dedup();

            let mut header = vec!["agent", "appels_presentes", "appels_traites"];
            header.extend(extra.iter().map(|k| k.as_str()));
            wtr.write_record(&header)?;

            for record in &result.agents_data {
                let mut row = vec![
                    record.agent.clone(),
                    opt(record.calls_presented),
                    opt(record.calls_handled),
                ];
                row.extend(
                    extra
                        .iter()
                        .map(|k| record.columns.get(*k).cloned().unwrap_or_default()),
                );
                wtr.write_record(&row)?;
            }
        }
        Dataset::Resolution => {
            wtr.write_record(["mois", "n2", "appels", "resolus_n1", "pourcentage"])?;
            for record in &result.resolution_data {
                wtr.write_record([
                    record.index.to_string(),
                    record.n2.to_string(),
                    record.calls.to_string(),
                    record.resolved_n1.to_string(),
                    record.percentage.to_string(),
                ])?;
            }
        }
        Dataset::Tickets => {
            let mut header = vec!["jour".to_string()];
            header.extend((1..=TICKET_MONTHS).map(TicketRecord::month_key));
            wtr.write_record(&header)?;

            for record in &result.tickets_data {
                let mut row = vec![record.day.to_string()];
                row.extend((1..=TICKET_MONTHS).map(|n| opt(record.count(n))));
                wtr.write_record(&row)?;
            }
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(result: &ParseResult, analysis: Option<&ReportAnalysis>, sample_data: bool) -> String {
    let mut output = String::new();

    output.push_str("Rapport d'activité téléphonique\n");
    if sample_data {
        output.push_str("(données d'exemple)\n");
    }
    output.push('\n');

    if let Some(analysis) = analysis {
        let summary = &analysis.summary;
        output.push_str(&format!("Mois analysés:     {}\n", summary.months_covered));
        output.push_str(&format!(
            "Appels présentés:  {}\n",
            format_number_french(summary.total_calls_presented as f64)
        ));
        output.push_str(&format!(
            "Appels traités:    {}\n",
            format_number_french(summary.total_calls_handled as f64)
        ));
        if let Some(rate) = summary.computed_resolution_rate {
            output.push_str(&format!("Taux de résolution: {:.1}%\n", rate));
        }
        if let Some(duration) = summary.mean_conversation_duration {
            output.push_str(&format!(
                "Durée moyenne:     {} ({:.2} min)\n",
                format_duration(duration),
                duration
            ));
        }
        output.push_str(&format!("Agents actifs:     {}\n", summary.active_agents));
        if let Some(agent) = &summary.most_active_agent {
            output.push_str(&format!("Agent le plus actif: {}\n", agent));
        }
        output.push('\n');
    }

    if !result.monthly_data.is_empty() {
        output.push_str("Activité mensuelle:\n");
        for record in &result.monthly_data {
            output.push_str(&format!(
                "  {:<10} {:>6} / {:<6} {:>6} min  {} agents\n",
                record.month.name(),
                opt(record.calls_handled),
                opt(record.calls_presented),
                opt(record.avg_conversation_duration),
                opt(record.max_agents),
            ));
        }
        output.push('\n');
    }

    if !result.agents_data.is_empty() {
        output.push_str("Agents:\n");
        for record in &result.agents_data {
            output.push_str(&format!(
                "  {:<20} {:>6} présentés {:>6} traités\n",
                record.agent,
                opt(record.calls_presented),
                opt(record.calls_handled),
            ));
        }
        output.push('\n');
    }

    if let Some(rate) = result.kpi_data.global_resolution_rate {
        output.push_str(&format!("Taux de résolution global (rapport): {}%\n\n", rate));
    }

    if let Some(analysis) = analysis {
        push_list(&mut output, "Points clés:", &analysis.key_points);
        push_list(&mut output, "Évolution de la résolution:", &analysis.resolution_evolution);
        push_list(&mut output, "Recommandations:", &analysis.recommendations);
        if let Some(score) = analysis.performance_score {
            output.push_str(&format!("Score de performance: {:.1}/100\n\n", score));
        }
    }

    push_list(&mut output, "Avertissements:", &result.warnings);

    output
}

fn push_list(output: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    output.push_str(title);
    output.push('\n');
    for item in items {
        output.push_str(&format!("  - {}\n", item));
    }
    output.push('\n');
}
