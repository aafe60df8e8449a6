//! ISO 6346 container number extraction.
//!
//! Only the lexical shape is checked (four uppercase letters followed by
//! seven digits). The check digit is not validated.

use super::FieldExtractor;
use super::patterns::CONTAINER_ID;

/// Container identifier extractor.
pub struct ContainerIdExtractor;

impl ContainerIdExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerIdExtractor {
    /// Every container number in the text, in order of appearance.
    pub fn extract_all(&self, text: &str) -> Vec<String> {
        CONTAINER_ID
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for ContainerIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ContainerIdExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        CONTAINER_ID.find(text).map(|m| m.as_str().to_string())
    }
}

/// Extract every container number on a line, in order of appearance.
pub fn extract_container_ids(line: &str) -> Vec<String> {
    ContainerIdExtractor::new().extract_all(line)
}
