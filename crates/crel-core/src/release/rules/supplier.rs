//! Supplier detection against the supplier directory.

use crate::models::config::FallbackSupplier;
use crate::suppliers::SupplierDirectory;

use super::FieldExtractor;
use super::normalize::normalize;

/// Supplier extractor.
///
/// Works on whole-page text. The page is normalized once and every
/// directory entry is probed in dataset order; keyword fallbacks are only
/// consulted when no entry matched.
pub struct SupplierExtractor<'a> {
    directory: &'a SupplierDirectory,
    fallbacks: Vec<(String, String)>,
}

impl<'a> SupplierExtractor<'a> {
    /// Create an extractor over a directory with no keyword fallbacks.
    pub fn new(directory: &'a SupplierDirectory) -> Self {
        Self {
            directory,
            fallbacks: Vec::new(),
        }
    }

    /// Add keyword fallbacks, probed in order after the directory.
    pub fn with_fallbacks(mut self, fallbacks: &[FallbackSupplier]) -> Self {
        self.fallbacks = fallbacks
            .iter()
            .map(|f| (normalize(&f.keyword).trim().to_string(), f.display_name.clone()))
            .filter(|(keyword, _)| !keyword.is_empty())
            .collect();
        self
    }

    /// Detect the supplier in text that has already been normalized.
    pub fn extract_normalized(&self, normalized_text: &str) -> Option<String> {
        if let Some(entry) = self.directory.find_in_normalized(normalized_text) {
            return Some(entry.display_name.clone());
        }

        self.fallbacks
            .iter()
            .find(|(keyword, _)| normalized_text.contains(keyword.as_str()))
            .map(|(_, display)| display.clone())
    }
}

impl FieldExtractor for SupplierExtractor<'_> {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_normalized(&normalize(text))
    }
}
