//! Proforma / invoice reference extraction.

use regex::Regex;

use super::FieldExtractor;
use super::patterns::{INVOICE_NO, PROFORMA_INVOICE_NO};

/// Reference extractor trying "Proforma Invoice No" before "Invoice No".
pub struct ReferenceExtractor {
    patterns: [&'static Regex; 2],
}

impl ReferenceExtractor {
    pub fn new() -> Self {
        Self {
            patterns: [&*PROFORMA_INVOICE_NO, &*INVOICE_NO],
        }
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReferenceExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.captures(text))
            .map(|caps| caps[1].to_string())
    }
}

/// Extract the release reference of a page.
pub fn extract_reference(text: &str) -> Option<String> {
    ReferenceExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_proforma_reference() {
        let text = "Release order\nProforma Invoice No: PI-2024-88\nDate: 01/02/2024";
        assert_eq!(extract_reference(text), Some("PI-2024-88".to_string()));
    }

    #[test]
    fn test_invoice_reference_fallback() {
        let text = "Supplier release\nInvoice No: INV77\n";
        assert_eq!(extract_reference(text), Some("INV77".to_string()));
    }

    #[test]
    fn test_proforma_has_priority_over_earlier_invoice() {
        let text = "Invoice No: INV1\nProforma Invoice No: PI-9";
        assert_eq!(extract_reference(text), Some("PI-9".to_string()));
    }

    #[test]
    fn test_case_insensitive_and_trailing_punctuation() {
        assert_eq!(extract_reference("INVOICE NO. 42"), None);
        assert_eq!(extract_reference("invoice no:  AB-12/3"), Some("AB-12".to_string()));
    }

    #[test]
    fn test_no_reference() {
        assert_eq!(extract_reference("Container list"), None);
    }
}
