//! Process command - extract data from a single report file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use telerep_core::pdf::{PdfExtractor, PdfProcessor};
use telerep_core::{ParseResult, TelephonyReportParser, analyze, sample_report};

use super::load_config;
use super::output::{Dataset, OutputFormat, format_report};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF report
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a timestamped export into this directory
    #[arg(long, conflicts_with = "output")]
    export_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Record set exported by the CSV format
    #[arg(short, long, value_enum, default_value = "monthly")]
    dataset: Dataset,

    /// Use the sample dataset when the report cannot be parsed
    #[arg(long)]
    fallback_sample: bool,

    /// Skip the table-based extractors
    #[arg(long)]
    basic: bool,

    /// Leave the KPI analysis out of the output
    #[arg(long)]
    no_analysis: bool,

    /// Print the extracted text and tables instead of parsing
    #[arg(long)]
    dump: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());
    let data = fs::read(&args.input)?;

    if args.dump {
        return dump_pdf(&data);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message("Parsing report...");

    let parser = TelephonyReportParser::from_config(&config.extraction)
        .with_advanced_parsing(config.extraction.advanced_parsing && !args.basic);
    let parsed = parser.parse_pdf(&data);

    pb.finish_and_clear();

    let (result, sample_data) = resolve_result(parsed, args.fallback_sample, &args.input)?;

    for warning in &result.warnings {
        warn!("{}", warning);
    }

    let analysis = (!args.no_analysis).then(|| analyze(&result, &config.analysis));
    let output = format_report(&result, analysis.as_ref(), args.format, args.dataset, sample_data)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else if let Some(export_dir) = &args.export_dir {
        fs::create_dir_all(export_dir)?;
        let export_path = export_dir.join(export_file_name(args.format));
        fs::write(&export_path, &output)?;
        println!(
            "{} Export written to {}",
            style("✓").green(),
            export_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Apply the fallback policy to a parse result.
///
/// Returns the result to output and whether it is the sample dataset.
fn resolve_result(result: ParseResult, fallback_sample: bool, input: &Path) -> anyhow::Result<(ParseResult, bool)> {
    if result.parsing_success {
        return Ok((result, false));
    }

    let error = result.error.unwrap_or_default();
    if !fallback_sample {
        anyhow::bail!("Failed to parse {}: {}", input.display(), error);
    }

    eprintln!(
        "{} Failed to parse {}: {}",
        style("⚠").yellow(),
        input.display(),
        error
    );
    eprintln!("{} Using sample data instead", style("ℹ").blue());
    Ok((sample_report(), true))
}

/// `rapport_telephonie_YYYYMMDD_HHMMSS.<ext>`
fn export_file_name(format: OutputFormat) -> String {
    format!(
        "rapport_telephonie_{}.{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

fn dump_pdf(data: &[u8]) -> anyhow::Result<()> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    debug!("PDF has {} pages", extractor.page_count());

    println!("{}", style("Text:").bold());
    println!("{}", extractor.extract_text()?);

    let tables = extractor.extract_tables()?;
    println!();
    println!("{} {}", style("Tables:").bold(), tables.len());
    for (i, table) in tables.iter().enumerate() {
        println!();
        println!("#{} ({} rows)", i + 1, table.len());
        for row in &table.rows {
            let cells: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("")).collect();
            println!("  | {} |", cells.join(" | "));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_success_passes_through() {
        let (result, sample) = resolve_result(sample_report(), false, Path::new("a.pdf")).unwrap();
        assert!(result.parsing_success);
        assert!(!sample);
    }

    #[test]
    fn test_resolve_failure() {
        let failed = ParseResult::failure("PDF is encrypted");
        let err = resolve_result(failed.clone(), false, Path::new("a.pdf")).unwrap_err();
        assert!(err.to_string().contains("PDF is encrypted"));

        let (result, sample) = resolve_result(failed, true, Path::new("a.pdf")).unwrap();
        assert!(sample);
        assert_eq!(result.monthly_data.len(), 8);
    }

    #[test]
    fn test_export_file_name() {
        let name = export_file_name(OutputFormat::Csv);
        assert!(name.starts_with("rapport_telephonie_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "rapport_telephonie_20250101_000000.csv".len());
    }
}
