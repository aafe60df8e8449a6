//! Batch processing command for multiple documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use crel_core::models::record::RecordTable;
use crel_core::release::ExtractionResult;

use crate::output::{delimiter_byte, format_table, OutputFormat};

use super::process::extract_file;
use super::{load_config, load_directory};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Supplier dataset (overrides the configured one)
    #[arg(short, long)]
    suppliers: Option<PathBuf>,

    /// Pair container ids with the size/type and condition of their own line
    #[arg(long)]
    per_line: bool,

    /// Also write every record into one CSV export
    #[arg(long)]
    combined: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let directory = load_directory(&config, args.suppliers.as_ref())?;
    let delimiter = delimiter_byte(config.export.delimiter)?;

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );
    let file_pb = ProgressBar::hidden();

    // Documents are processed one after another
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = extract_file(&path, &config, &directory, args.per_line, &file_pb);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(extraction) => {
                results.push(ProcessResult {
                    path: path.clone(),
                    extraction: Some(extraction),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path: path.clone(),
                        extraction: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.extraction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    // Write per-file outputs
    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            let Some(extraction) = &result.extraction else {
                continue;
            };
            if extraction.table.is_empty() {
                debug!("No records in {}, skipping output", result.path.display());
                continue;
            }

            let output_name = result.path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("release");
            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            let content = format_table(&extraction.table, args.format, delimiter)?;
            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.combined {
        let mut combined = RecordTable::default();
        for result in &successful {
            if let Some(extraction) = &result.extraction {
                combined.extend(extraction.table.clone());
            }
        }

        let combined_path = output_path_for(&args.output_dir, &config.export.file_name);
        fs::write(&combined_path, format_table(&combined, OutputFormat::Csv, delimiter)?)?;
        println!(
            "{} {} record(s) written to {}",
            style("✓").green(),
            combined.len(),
            combined_path.display()
        );
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = output_path_for(&args.output_dir, "summary.csv");
        write_summary(&summary_path, &results, delimiter)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let total_records: usize = successful
        .iter()
        .filter_map(|r| r.extraction.as_ref())
        .map(|e| e.table.len())
        .sum();
    let empty: Vec<_> = successful
        .iter()
        .filter(|r| r.extraction.as_ref().is_some_and(|e| e.table.is_empty()))
        .collect();

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} records, {} without records), {} failed",
        style(successful.len()).green(),
        total_records,
        style(empty.len()).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn output_path_for(output_dir: &Option<PathBuf>, file_name: &str) -> PathBuf {
    output_dir
        .as_ref()
        .map(|d| d.join(file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

fn write_summary(path: &Path, results: &[ProcessResult], delimiter: u8) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "records",
        "pages",
        "pages_skipped",
        "dropped_containers",
        "supplier",
        "reference",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(extraction) = &result.extraction {
            let stats = &extraction.stats;
            let status = if extraction.table.is_empty() { "empty" } else { "success" };
            wtr.write_record([
                filename,
                status,
                &extraction.table.len().to_string(),
                &stats.pages_total.to_string(),
                &stats.pages_skipped.to_string(),
                &stats.dropped_containers.to_string(),
                stats.suppliers_found.first().map(String::as_str).unwrap_or(""),
                stats.references_found.first().map(String::as_str).unwrap_or(""),
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
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
