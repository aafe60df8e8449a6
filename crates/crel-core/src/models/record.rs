//! Container record models.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for an undetected size/type.
pub const UNKNOWN_SIZE_TYPE: &str = "Unknown Size/Type";
/// Placeholder for an undetected condition.
pub const UNKNOWN_CONDITION: &str = "Unknown Condition";
/// Placeholder for an undetected supplier.
pub const UNKNOWN_SUPPLIER: &str = "Unknown Supplier";
/// Placeholder for an undetected release reference.
pub const UNKNOWN_REFERENCE: &str = "Unknown Proforma Invoice No";

/// Export column headers, in output order.
pub const COLUMNS: [&str; 5] = [
    "Container",
    "Size/Type",
    "Condition",
    "Supplier",
    "Supplier Release Ref",
];

/// Inspection condition of a container lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "As Is")]
    AsIs,
    Recycle,
    Damage,
    New,
    #[serde(rename = "IICL")]
    Iicl,
}

impl Condition {
    /// Recognized conditions in match priority order.
    pub const ALL: [Condition; 5] = [
        Condition::AsIs,
        Condition::Recycle,
        Condition::Damage,
        Condition::New,
        Condition::Iicl,
    ];

    /// Label as printed on documents and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::AsIs => "As Is",
            Condition::Recycle => "Recycle",
            Condition::Damage => "Damage",
            Condition::New => "New",
            Condition::Iicl => "IICL",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One detected container with its associated fields.
///
/// Only the container id is guaranteed. Missing fields stay `None` until
/// the record is turned into a [`RecordRow`] for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerRecord {
    /// ISO 6346 container number.
    pub container_id: String,

    /// Abbreviated size/type code (e.g. `40'HC`).
    pub size_type: Option<String>,

    /// Inspection condition.
    pub condition: Option<Condition>,

    /// Supplier display name, shared by every record of a document.
    pub supplier: Option<String>,

    /// Proforma/invoice reference, shared by every record of a document.
    pub reference: Option<String>,
}

impl ContainerRecord {
    /// Render the record with placeholders for missing fields.
    pub fn to_row(&self) -> RecordRow {
        RecordRow {
            container: self.container_id.clone(),
            size_type: self
                .size_type
                .clone()
                .unwrap_or_else(|| UNKNOWN_SIZE_TYPE.to_string()),
            condition: self
                .condition
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| UNKNOWN_CONDITION.to_string()),
            supplier: self
                .supplier
                .clone()
                .unwrap_or_else(|| UNKNOWN_SUPPLIER.to_string()),
            reference: self
                .reference
                .clone()
                .unwrap_or_else(|| UNKNOWN_REFERENCE.to_string()),
        }
    }
}

/// A fully populated export row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    #[serde(rename = "Container")]
    pub container: String,
    #[serde(rename = "Size/Type")]
    pub size_type: String,
    #[serde(rename = "Condition")]
    pub condition: String,
    #[serde(rename = "Supplier")]
    pub supplier: String,
    #[serde(rename = "Supplier Release Ref")]
    pub reference: String,
}

impl RecordRow {
    /// Fields in [`COLUMNS`] order.
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.container,
            &self.size_type,
            &self.condition,
            &self.supplier,
            &self.reference,
        ]
    }
}

/// Ordered records produced by one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordTable {
    records: Vec<ContainerRecord>,
}

impl RecordTable {
    pub fn new(records: Vec<ContainerRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ContainerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContainerRecord> {
        self.records.iter()
    }

    /// Rows with placeholders, in record order.
    pub fn rows(&self) -> Vec<RecordRow> {
        self.records.iter().map(ContainerRecord::to_row).collect()
    }

    /// Container ids of this table that already appear in `existing`,
    /// in record order without repeats.
    pub fn duplicates_of(&self, existing: &HashSet<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| &r.container_id)
            .filter(|id| existing.contains(*id) && seen.insert(*id))
            .cloned()
            .collect()
    }

    /// Append another table's records.
    pub fn extend(&mut self, other: RecordTable) {
        self.records.extend(other.records);
    }
}

impl IntoIterator for RecordTable {
    type Item = ContainerRecord;
    type IntoIter = std::vec::IntoIter<ContainerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a ContainerRecord;
    type IntoIter = std::slice::Iter<'a, ContainerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: &str) -> ContainerRecord {
        ContainerRecord {
            container_id: id.to_string(),
            size_type: Some("40'HC".to_string()),
            condition: Some(Condition::AsIs),
            supplier: None,
            reference: None,
        }
    }

    #[test]
    fn test_row_uses_placeholders() {
        let row = record("TCLU1234567").to_row();
        assert_eq!(
            row.fields(),
            ["TCLU1234567", "40'HC", "As Is", UNKNOWN_SUPPLIER, UNKNOWN_REFERENCE]
        );
    }

    #[test]
    fn test_condition_labels() {
        assert_eq!(Condition::Iicl.label(), "IICL");
        assert_eq!(Condition::Damage.to_string(), "Damage");
    }

    #[test]
    fn test_condition_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Condition::AsIs).unwrap(), "\"As Is\"");
    }

    #[test]
    fn test_duplicates_of() {
        let table = RecordTable::new(vec![
            record("TCLU1234567"),
            record("MSKU7654321"),
            record("TCLU1234567"),
        ]);
        let existing: HashSet<String> = ["TCLU1234567".to_string()].into_iter().collect();
        assert_eq!(table.duplicates_of(&existing), vec!["TCLU1234567".to_string()]);
        assert!(table.duplicates_of(&HashSet::new()).is_empty());
    }
}
