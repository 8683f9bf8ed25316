//! Batch processing command for multiple report files.
//!
//! Files are parsed one after another.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use telerep_core::{ParseResult, TelephonyReportParser, analyze};

use super::load_config;
use super::output::{Dataset, OutputFormat, format_report};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Record set exported by the CSV format
    #[arg(short, long, value_enum, default_value = "monthly")]
    dataset: Dataset,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Skip the table-based extractors
    #[arg(long)]
    basic: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    report: ParseResult,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = TelephonyReportParser::from_config(&config.extraction)
        .with_advanced_parsing(config.extraction.advanced_parsing && !args.basic);

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let report = parser.parse_file(&path);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        if let Some(error_msg) = report.error.as_deref().filter(|_| !report.parsing_success) {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", path.display(), error_msg);
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        results.push(ProcessResult {
            path,
            report,
            processing_time_ms,
        });
        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let (successful, failed): (Vec<&ProcessResult>, Vec<&ProcessResult>) =
        results.iter().partition(|r| r.report.parsing_success);

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("report");
            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            let analysis = analyze(&result.report, &config.analysis);
            let content = format_report(&result.report, Some(&analysis), args.format, args.dataset, false)?;

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.report.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "months",
        "agents",
        "total_appels_presentes",
        "total_appels_traites",
        "taux_resolution",
        "warnings",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let report = &result.report;

        if report.parsing_success {
            let summary = telerep_core::analysis::summarize(report);
            wtr.write_record([
                filename,
                "success",
                &summary.months_covered.to_string(),
                &summary.active_agents.to_string(),
                &summary.total_calls_presented.to_string(),
                &summary.total_calls_handled.to_string(),
                &summary
                    .computed_resolution_rate
                    .map(|r| format!("{:.2}", r))
                    .unwrap_or_default(),
                &report.warnings.len().to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                report.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use telerep_core::sample_report;

    #[test]
    fn test_summary_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let results = vec![
            ProcessResult {
                path: PathBuf::from("/tmp/janvier.pdf"),
                report: sample_report(),
                processing_time_ms: 12,
            },
            ProcessResult {
                path: PathBuf::from("/tmp/casse.pdf"),
                report: ParseResult::failure("PDF has no pages"),
                processing_time_ms: 1,
            },
        ];

        write_summary(&path, &results).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "janvier.pdf,success,8,4,4352,4211,96.76,0,12,");
        assert_eq!(lines[2], "casse.pdf,error,,,,,,,1,PDF has no pages");
    }
}
