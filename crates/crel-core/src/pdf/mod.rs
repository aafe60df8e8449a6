//! Page-segmented document access.
//!
//! The extraction engine only ever sees pages of plain text. PDFs go
//! through [`PdfExtractor`]; plain-text documents through [`TextDocument`].

mod extractor;
mod text;

pub use extractor::PdfExtractor;
pub use text::{TextDocument, PAGE_SEPARATOR};

use std::path::Path;

use crate::error::{CrelError, ExtractionError, PdfError};

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A document made of text pages.
pub trait PageSource {
    /// Number of pages, including pages without text.
    fn page_count(&self) -> u32;

    /// Text of a 1-indexed page, or `None` when the page has no
    /// extractable text (scanned image, broken content stream, blank page).
    fn page_text(&self, page: u32) -> Option<&str>;
}

/// Load a `.pdf` or `.txt` document from disk.
pub fn load_document(path: &Path) -> std::result::Result<Box<dyn PageSource>, CrelError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = std::fs::read(path)?;
            let mut extractor = PdfExtractor::new();
            extractor.load(&data)?;
            Ok(Box::new(extractor))
        }
        "txt" => {
            let text = std::fs::read_to_string(path)?;
            Ok(Box::new(TextDocument::new(&text)))
        }
        _ => Err(ExtractionError::UnsupportedFormat(extension).into()),
    }
}
