//! Process command - extract container records from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crel_core::models::config::{Alignment, CrelConfig};
use crel_core::pdf::{load_document, PageSource};
use crel_core::release::{ExtractionEngine, ExtractionResult};
use crel_core::suppliers::SupplierDirectory;

use crate::output::{append_export, delimiter_byte, format_table, AppendOutcome, OutputFormat};

use super::{load_config, load_directory};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or form-feed separated text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file or directory (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Supplier dataset (overrides the configured one)
    #[arg(short, long)]
    suppliers: Option<PathBuf>,

    /// Pair container ids with the size/type and condition of their own line
    #[arg(long)]
    per_line: bool,

    /// Merge records into an existing CSV export, refusing duplicate containers
    #[arg(long, conflicts_with = "output")]
    append: Option<PathBuf>,

    /// Show extraction statistics
    #[arg(long)]
    show_stats: bool,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let directory = load_directory(&config, args.suppliers.as_ref())?;
    let delimiter = delimiter_byte(config.export.delimiter)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );

    let result = extract_file(&args.input, &config, &directory, args.per_line, &pb)?;
    pb.finish_and_clear();

    if result.table.is_empty() {
        if result.stats.pages_with_text == 0 {
            println!(
                "{} No extractable text in {} ({} page(s) skipped)",
                style("!").yellow(),
                args.input.display(),
                result.stats.pages_skipped
            );
        }
        println!(
            "{} No valid container records found in {}",
            style("ℹ").blue(),
            args.input.display()
        );
        return Ok(());
    }

    if let Some(export_path) = &args.append {
        match append_export(export_path, &result.table, delimiter)? {
            AppendOutcome::Appended { added, total } => {
                println!(
                    "{} Added {} record(s) to {} ({} total)",
                    style("✓").green(),
                    added,
                    export_path.display(),
                    total
                );
            }
            AppendOutcome::Duplicates(ids) => {
                anyhow::bail!(
                    "The following containers already exist in {} and cannot be added: {}",
                    export_path.display(),
                    ids.join(", ")
                );
            }
        }
    } else {
        let output = format_table(&result.table, args.format, delimiter)?;

        if let Some(output_path) = &args.output {
            let output_path = resolve_output_path(output_path, &config);
            fs::write(&output_path, &output)?;
            println!(
                "{} {} record(s) written to {}",
                style("✓").green(),
                result.table.len(),
                output_path.display()
            );
        } else {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
    }

    if args.show_stats {
        let stats = &result.stats;
        eprintln!();
        eprintln!(
            "{} Pages: {} ({} with text, {} skipped)",
            style("ℹ").blue(),
            stats.pages_total,
            stats.pages_with_text,
            stats.pages_skipped
        );
        eprintln!(
            "{} Found {} container(s), {} size/type(s), {} condition(s)",
            style("ℹ").blue(),
            stats.containers_found,
            stats.size_types_found,
            stats.conditions_found
        );
        if stats.dropped_containers > 0 {
            eprintln!(
                "{} {} container(s) dropped by alignment (try --per-line)",
                style("!").yellow(),
                stats.dropped_containers
            );
        }
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load a document and run the engine over it.
pub fn extract_file(
    path: &Path,
    config: &CrelConfig,
    directory: &SupplierDirectory,
    per_line: bool,
    pb: &ProgressBar,
) -> anyhow::Result<ExtractionResult> {
    pb.set_message("Loading document...");
    let document = load_document(path)?;
    debug!("Document has {} pages", document.page_count());

    let mut engine = ExtractionEngine::from_config(directory, &config.extraction);
    if per_line {
        engine = engine.with_alignment(Alignment::PerLine);
    }

    pb.set_message("Extracting container records...");
    Ok(engine.run(document.as_ref()))
}

/// Directories receive the configured export file name.
fn resolve_output_path(path: &Path, config: &CrelConfig) -> PathBuf {
    if path.is_dir() {
        path.join(&config.export.file_name)
    } else {
        path.to_path_buf()
    }
}
