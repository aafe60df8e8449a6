//! Record table assembly.

use tracing::warn;

use crate::models::record::{ContainerRecord, RecordTable};

use super::engine::ColumnSet;

/// Zip aligned columns into records, preserving column order.
///
/// No deduplication or validation happens here. Columns of unequal length
/// are zipped to the shortest one.
pub fn build_records(columns: ColumnSet) -> RecordTable {
    if !columns.is_aligned() {
        warn!(
            "Building records from unaligned columns: {} containers, {} size/types, {} conditions, {} suppliers, {} references",
            columns.containers.len(),
            columns.size_types.len(),
            columns.conditions.len(),
            columns.suppliers.len(),
            columns.references.len()
        );
    }

    let ColumnSet {
        containers,
        size_types,
        conditions,
        suppliers,
        references,
    } = columns;

    let records = containers
        .into_iter()
        .zip(size_types)
        .zip(conditions)
        .zip(suppliers)
        .zip(references)
        .map(
            |((((container_id, size_type), condition), supplier), reference)| ContainerRecord {
                container_id,
                size_type,
                condition,
                supplier,
                reference,
            },
        )
        .collect();

    RecordTable::new(records)
}

impl From<ColumnSet> for RecordTable {
    fn from(columns: ColumnSet) -> Self {
        build_records(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Condition;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_preserves_order_and_duplicates() {
        let columns = ColumnSet {
            containers: vec!["TCLU1000001".into(), "TCLU1000001".into()],
            size_types: vec![Some("20'DV".into()), Some("40'HC".into())],
            conditions: vec![Some(Condition::New), Some(Condition::AsIs)],
            suppliers: vec![Some("CSAV".into()); 2],
            references: vec![None; 2],
        };
        let table = build_records(columns);

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].container_id, "TCLU1000001");
        assert_eq!(table.records()[1].size_type.as_deref(), Some("40'HC"));
        assert_eq!(table.records()[1].condition, Some(Condition::AsIs));
        assert_eq!(table.records()[0].supplier.as_deref(), Some("CSAV"));
    }

    #[test]
    fn test_unaligned_columns_zip_to_shortest() {
        let columns = ColumnSet {
            containers: vec!["TCLU1000001".into(), "TCLU1000002".into()],
            size_types: vec![None],
            conditions: vec![None, None],
            suppliers: vec![None, None],
            references: vec![None, None],
        };
        assert_eq!(RecordTable::from(columns).len(), 1);
    }

    #[test]
    fn test_empty_columns() {
        assert!(build_records(ColumnSet::default()).is_empty());
    }
}
