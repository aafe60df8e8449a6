//! Supplier reference directory.
//!
//! Loaded once from a delimited dataset (`Company Name`, `Commercial Name`)
//! and read-only afterwards. The directory is passed to the extraction
//! engine explicitly; nothing in this crate keeps a global copy.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::DirectoryError;
use crate::release::rules::normalize;

/// Header names accepted for the legal name column.
const LEGAL_NAME_COLUMNS: [&str; 2] = ["company name", "legal_name"];

/// Header names accepted for the display name column.
const DISPLAY_NAME_COLUMNS: [&str; 2] = ["commercial name", "display_name"];

/// A supplier known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierEntry {
    /// Registered company name as it appears on documents.
    pub legal_name: String,
    /// Short commercial name used in exported records.
    pub display_name: String,
    #[serde(skip)]
    normalized: String,
}

impl SupplierEntry {
    /// Create an entry, caching the normalized legal name.
    ///
    /// The normalized name keeps its surrounding whitespace, so a legal
    /// name ending in a lone punctuation mark only matches when a space
    /// follows the name in the document.
    pub fn new(legal_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        let legal_name = legal_name.into();
        let normalized = normalize(&legal_name);
        Self {
            legal_name,
            display_name: display_name.into(),
            normalized,
        }
    }

    /// Normalized legal name used for matching.
    pub fn normalized_name(&self) -> &str {
        &self.normalized
    }

    /// Whether the normalized name has no letters or digits left.
    fn is_unmatchable(&self) -> bool {
        self.normalized.trim().is_empty()
    }
}

/// Read-only table of known suppliers, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct SupplierDirectory {
    entries: Vec<SupplierEntry>,
}

impl SupplierDirectory {
    /// Create an empty directory.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a directory from (legal name, display name) pairs.
    pub fn from_entries<I, L, D>(entries: I) -> Self
    where
        I: IntoIterator<Item = (L, D)>,
        L: Into<String>,
        D: Into<String>,
    {
        let mut directory = Self::empty();
        for (legal, display) in entries {
            directory.push(SupplierEntry::new(legal, display));
        }
        directory
    }

    /// Load the directory from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self, DirectoryError> {
        let file = File::open(path).map_err(|source| DirectoryError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let directory = Self::from_reader(file)?;
        debug!("Loaded {} suppliers from {}", directory.len(), path.display());
        Ok(directory)
    }

    /// Load the directory from CSV data with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().map_err(|e| DirectoryError::MalformedRow {
            line: 1,
            reason: e.to_string(),
        })?;
        let legal_idx = column_index(headers, &LEGAL_NAME_COLUMNS)
            .ok_or(DirectoryError::MissingColumn("Company Name"))?;
        let display_idx = column_index(headers, &DISPLAY_NAME_COLUMNS)
            .ok_or(DirectoryError::MissingColumn("Commercial Name"))?;

        let mut directory = Self::empty();
        for record in rdr.records() {
            let record = record.map_err(|e| DirectoryError::MalformedRow {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: e.to_string(),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let (Some(legal), Some(display)) = (record.get(legal_idx), record.get(display_idx))
            else {
                return Err(DirectoryError::MalformedRow {
                    line,
                    reason: format!("expected at least {} fields", legal_idx.max(display_idx) + 1),
                });
            };

            let entry = SupplierEntry::new(legal, display);
            if entry.is_unmatchable() {
                warn!("Skipping supplier on line {}: legal name '{}' has no matchable text", line, legal);
                continue;
            }
            directory.push(entry);
        }

        Ok(directory)
    }

    fn push(&mut self, entry: SupplierEntry) {
        self.entries.push(entry);
    }

    /// All entries in dataset order.
    pub fn entries(&self) -> &[SupplierEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose normalized legal name occurs in already-normalized text.
    pub fn find_in_normalized(&self, normalized_text: &str) -> Option<&SupplierEntry> {
        self.entries
            .iter()
            .filter(|e| !e.is_unmatchable())
            .find(|e| normalized_text.contains(&e.normalized))
    }
}

fn column_index(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
}
