//! Container condition extraction.

use crate::models::record::Condition;

use super::FieldExtractor;

/// Condition keyword extractor (case-insensitive, vocabulary order).
pub struct ConditionExtractor;

impl ConditionExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConditionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ConditionExtractor {
    type Output = Condition;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let lowered = text.to_lowercase();
        Condition::ALL
            .into_iter()
            .find(|c| lowered.contains(&c.label().to_lowercase()))
    }
}

/// Extract the condition of a line.
pub fn extract_condition(line: &str) -> Option<Condition> {
    ConditionExtractor::new().extract(line)
}
