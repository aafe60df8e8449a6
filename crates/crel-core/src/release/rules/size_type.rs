//! Container size/type code extraction.

use crate::models::config::SizeTypeOrder;

use super::FieldExtractor;

/// Raw size/type tokens and their abbreviated codes, in declaration order.
pub const SIZE_TYPE_CODES: [(&str, &str); 16] = [
    ("20DRY", "20'DV"),
    ("40DRY", "40'DV"),
    ("40HIGH", "40'HC"),
    ("45HIGH", "45'HC"),
    ("20REEFER", "20'RF"),
    ("40REEFER", "40'RF"),
    ("40HCRF", "40'HCRF"),
    ("45REEFER", "45'RF"),
    ("20FLAT", "20'FR"),
    ("40FLAT", "40'FR"),
    ("40HIGHFLAT", "40'HFR"),
    ("20OPENTOP", "20'OT"),
    ("40OPENTOP", "40'OT"),
    ("40HIGHOPENTOP", "40'HOT"),
    ("20PLATFORM", "20'PL"),
    ("40PLATFORM", "40'PL"),
];

/// Size/type extractor.
///
/// Matching is case-sensitive substring search. Keys sharing a prefix
/// (`40HIGH`, `40HIGHFLAT`, `40HIGHOPENTOP`) shadow each other, so the
/// probe order matters; see [`SizeTypeOrder`].
pub struct SizeTypeExtractor {
    keys: Vec<(&'static str, &'static str)>,
}

impl SizeTypeExtractor {
    /// Create an extractor probing longer keys first.
    pub fn new() -> Self {
        Self::with_order(SizeTypeOrder::LongestFirst)
    }

    /// Create an extractor with an explicit probe order.
    pub fn with_order(order: SizeTypeOrder) -> Self {
        let mut keys = SIZE_TYPE_CODES.to_vec();
        if order == SizeTypeOrder::LongestFirst {
            // stable: equal lengths keep declaration order
            keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        }
        Self { keys }
    }
}

impl Default for SizeTypeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for SizeTypeExtractor {
    type Output = &'static str;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.keys
            .iter()
            .find(|(raw, _)| text.contains(raw))
            .map(|(_, code)| *code)
    }
}

/// Extract the size/type code of a line.
pub fn extract_size_type(line: &str) -> Option<&'static str> {
    SizeTypeExtractor::new().extract(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_key_maps_to_its_code() {
        for (raw, code) in SIZE_TYPE_CODES {
            let line = format!("TCLU1234567 {} As Is", raw);
            assert_eq!(extract_size_type(&line), Some(code), "key {}", raw);
        }
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_size_type("TCLU1234567 As Is"), None);
        assert_eq!(extract_size_type("40high"), None);
    }

    #[test]
    fn test_longest_first_resolves_shadowed_keys() {
        assert_eq!(extract_size_type("40HIGHFLAT"), Some("40'HFR"));
        assert_eq!(extract_size_type("40HIGHOPENTOP"), Some("40'HOT"));
        assert_eq!(extract_size_type("40HIGH CUBE"), Some("40'HC"));
    }

    #[test]
    fn test_declared_order_lets_prefix_win() {
        let extractor = SizeTypeExtractor::with_order(SizeTypeOrder::Declared);
        assert_eq!(extractor.extract("40HIGHFLAT"), Some("40'HC"));
        assert_eq!(extractor.extract("40HCRF"), Some("40'HCRF"));
    }
}
