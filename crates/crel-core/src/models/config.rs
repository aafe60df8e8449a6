//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the crel pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrelConfig {
    /// Record extraction configuration.
    pub extraction: ExtractionConfig,

    /// Supplier dataset configuration.
    pub suppliers: SupplierConfig,

    /// Export configuration.
    pub export: ExportConfig,
}

/// How container ids are paired with size/type and condition values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Collect each field independently across the document and truncate
    /// all columns to the shortest one.
    #[default]
    Positional,
    /// One record per container id, paired with the size/type and
    /// condition found on the same line.
    PerLine,
}

/// Probe order for size/type keys that share a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeTypeOrder {
    /// Longer keys first, so `40HIGHFLAT` is not reported as `40HIGH`.
    #[default]
    LongestFirst,
    /// Table declaration order.
    Declared,
}

/// A keyword that identifies a supplier missing from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackSupplier {
    /// Keyword searched in normalized page text.
    pub keyword: String,
    /// Display name reported on a hit.
    pub display_name: String,
}

impl FallbackSupplier {
    pub fn new(keyword: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            display_name: display_name.into(),
        }
    }
}

/// Record extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Column alignment strategy.
    pub alignment: Alignment,

    /// Size/type key probe order.
    pub size_type_order: SizeTypeOrder,

    /// Keyword fallbacks consulted when no directory entry matches.
    pub fallback_suppliers: Vec<FallbackSupplier>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            alignment: Alignment::Positional,
            size_type_order: SizeTypeOrder::LongestFirst,
            fallback_suppliers: vec![FallbackSupplier::new("maersk", "Maersk")],
        }
    }
}

/// Supplier dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierConfig {
    /// Path to the CSV dataset (`Company Name`, `Commercial Name`).
    pub dataset: PathBuf,
}

impl Default for SupplierConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("suppliers.csv"),
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name used when exporting into a directory.
    pub file_name: String,

    /// Field delimiter for CSV exports.
    pub delimiter: char,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "container_data.csv".to_string(),
            delimiter: ',',
        }
    }
}

impl CrelConfig {
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
