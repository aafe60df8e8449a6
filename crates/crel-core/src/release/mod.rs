//! Container record extraction.

mod engine;
pub mod rules;
mod table;

pub use engine::{ColumnSet, ExtractionEngine, ExtractionResult, ExtractionStats};
pub use table::build_records;

use crate::pdf::{PageSource, TextDocument};

/// Trait for container record extractors.
pub trait ReleaseExtractor {
    /// Extract container records from a paged document.
    fn extract_records(&self, document: &dyn PageSource) -> ExtractionResult;

    /// Extract container records from plain text (form-feed separated pages).
    fn extract_text(&self, text: &str) -> ExtractionResult {
        self.extract_records(&TextDocument::new(text))
    }
}
