//! PDF page text extraction using lopdf and pdf-extract.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PageSource, Result};
use crate::error::PdfError;

/// PDF text extractor.
///
/// Page texts are extracted once at load time. pdf-extract is tried first
/// for the whole document; if it fails or panics (it does on some malformed
/// fonts), each page is extracted on its own with lopdf so a single broken
/// page cannot take the others down.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    pages: Vec<Option<String>>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Load a PDF from bytes and extract the text of every page.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        self.pages = self.extract_pages();
        Ok(())
    }

    fn extract_pages(&self) -> Vec<Option<String>> {
        let page_count = self.page_count() as usize;

        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
        }));

        match extracted {
            Ok(Ok(texts)) if texts.len() == page_count => {
                return texts.into_iter().map(non_blank).collect();
            }
            Ok(Ok(texts)) => {
                warn!(
                    "pdf-extract returned {} pages for a {} page document, using lopdf",
                    texts.len(),
                    page_count
                );
            }
            Ok(Err(e)) => {
                warn!("pdf-extract failed ({}), using lopdf per page", e);
            }
            Err(payload) => {
                warn!(
                    "pdf-extract panicked ({}), using lopdf per page",
                    panic_message(payload.as_ref())
                );
            }
        }

        (1..=page_count as u32)
            .map(|page| self.extract_page_with_lopdf(page))
            .collect()
    }

    fn extract_page_with_lopdf(&self, page: u32) -> Option<String> {
        let doc = self.document.as_ref()?;
        match panic::catch_unwind(AssertUnwindSafe(|| doc.extract_text(&[page]))) {
            Ok(Ok(text)) => non_blank(text),
            Ok(Err(e)) => {
                trace!("No text on page {}: {}", page, e);
                None
            }
            Err(payload) => {
                warn!(
                    "lopdf panicked on page {} ({}), skipping",
                    page,
                    panic_message(payload.as_ref())
                );
                None
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for PdfExtractor {
    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn page_text(&self, page: u32) -> Option<&str> {
        let idx = page.checked_sub(1)? as usize;
        self.pages.get(idx)?.as_deref()
    }
}
