//! Core library for container release extraction.
//!
//! This crate provides:
//! - Page-segmented text access to PDF and plain-text documents
//! - Rule-based field extractors (ISO 6346 ids, size/type, condition,
//!   supplier, release reference)
//! - A read-only supplier directory loaded from CSV
//! - The extraction engine and record table builder

pub mod error;
pub mod models;
pub mod pdf;
pub mod release;
pub mod suppliers;

pub use error::{CrelError, Result};
pub use models::config::{Alignment, CrelConfig, SizeTypeOrder};
pub use models::record::{Condition, ContainerRecord, RecordRow, RecordTable};
pub use pdf::{load_document, PageSource, PdfExtractor, TextDocument};
pub use release::{
    build_records, ColumnSet, ExtractionEngine, ExtractionResult, ExtractionStats,
    ReleaseExtractor,
};
pub use suppliers::{SupplierDirectory, SupplierEntry};
