//! Record table serialization and spreadsheet export.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crel_core::models::record::{RecordRow, RecordTable, COLUMNS};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (opens in any spreadsheet)
    Csv,
    /// Plain text listing
    Text,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Outcome of merging records into an existing export.
#[derive(Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Rows written, including the ones already present.
    Appended { added: usize, total: usize },
    /// Nothing written; these container ids are already exported.
    Duplicates(Vec<String>),
}

/// Convert the configured delimiter to the byte the csv crate expects.
pub fn delimiter_byte(delimiter: char) -> anyhow::Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(|b| b.is_ascii())
        .ok_or_else(|| anyhow::anyhow!("CSV delimiter must be ASCII, got {:?}", delimiter))
}

pub fn format_table(table: &RecordTable, format: OutputFormat, delimiter: u8) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&table.rows())?),
        OutputFormat::Csv => format_csv(&table.rows(), delimiter),
        OutputFormat::Text => Ok(format_text(table)),
    }
}

fn format_csv(rows: &[RecordRow], delimiter: u8) -> anyhow::Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(vec![]);

    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.write_record(row.fields())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(table: &RecordTable) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:>4}  {}\n", "#", COLUMNS.join(" | ")));
    for (i, row) in table.rows().iter().enumerate() {
        output.push_str(&format!("{:>4}  {}\n", i + 1, row.fields().join(" | ")));
    }
    output.push_str(&format!("\n{} container(s)\n", table.len()));

    output
}

/// Read rows back from a CSV export.
pub fn read_export(path: &Path, delimiter: u8) -> anyhow::Result<Vec<RecordRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Merge a table into a CSV export, refusing containers already present.
///
/// The file is created when missing. Identical rows are written once.
pub fn append_export(path: &Path, table: &RecordTable, delimiter: u8) -> anyhow::Result<AppendOutcome> {
    let existing = if path.exists() {
        read_export(path, delimiter)?
    } else {
        Vec::new()
    };

    let existing_ids: HashSet<String> = existing.iter().map(|r| r.container.clone()).collect();
    let duplicates = table.duplicates_of(&existing_ids);
    if !duplicates.is_empty() {
        return Ok(AppendOutcome::Duplicates(duplicates));
    }

    let before = existing.len();
    let mut combined: Vec<RecordRow> = Vec::with_capacity(before + table.len());
    for row in existing.into_iter().chain(table.rows()) {
        if !combined.contains(&row) {
            combined.push(row);
        }
    }

    let total = combined.len();
    fs::write(path, format_csv(&combined, delimiter)?)?;
    debug!("Wrote {} rows to {}", total, path.display());

    Ok(AppendOutcome::Appended {
        added: total.saturating_sub(before),
        total,
    })
}
