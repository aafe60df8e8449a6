//! Document extraction engine.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::models::config::{Alignment, ExtractionConfig, FallbackSupplier};
use crate::models::record::{Condition, RecordTable};
use crate::pdf::PageSource;
use crate::suppliers::SupplierDirectory;

use super::rules::{
    normalize, ConditionExtractor, ContainerIdExtractor, FieldExtractor, ReferenceExtractor,
    SizeTypeExtractor, SupplierExtractor,
};
use super::table::build_records;
use super::ReleaseExtractor;

/// Parallel columns produced by one extraction run.
///
/// All five vectors have the same length; index `i` of each column
/// describes the same container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    pub containers: Vec<String>,
    pub size_types: Vec<Option<String>>,
    pub conditions: Vec<Option<Condition>>,
    pub suppliers: Vec<Option<String>>,
    pub references: Vec<Option<String>>,
}

impl ColumnSet {
    /// Number of rows (container ids).
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Whether every column has the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.containers.len();
        self.size_types.len() == n
            && self.conditions.len() == n
            && self.suppliers.len() == n
            && self.references.len() == n
    }
}

/// Counters describing what a run saw before alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// Pages in the document.
    pub pages_total: u32,
    /// Pages that yielded text.
    pub pages_with_text: u32,
    /// Pages skipped because no text could be extracted.
    pub pages_skipped: u32,
    /// Container ids found, before alignment.
    pub containers_found: usize,
    /// Size/type codes found, before alignment.
    pub size_types_found: usize,
    /// Conditions found, before alignment.
    pub conditions_found: usize,
    /// Distinct suppliers, in first-seen order.
    pub suppliers_found: Vec<String>,
    /// References, one per page where found.
    pub references_found: Vec<String>,
    /// Rows emitted.
    pub rows: usize,
    /// Container ids discarded by positional alignment.
    pub dropped_containers: usize,
}

/// Result of running the engine over a document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted records.
    pub table: RecordTable,
    /// Scan counters.
    pub stats: ExtractionStats,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Per-run accumulator.
#[derive(Default)]
struct Scan {
    containers: Vec<String>,
    size_types: Vec<String>,
    conditions: Vec<Condition>,
    suppliers: Vec<String>,
    references: Vec<String>,
    line_rows: Vec<(String, Option<String>, Option<Condition>)>,
    stats: ExtractionStats,
}

/// Line-oriented container record extraction engine.
///
/// Holds only read-only state, so one engine can serve any number of
/// documents.
pub struct ExtractionEngine<'a> {
    alignment: Alignment,
    containers: ContainerIdExtractor,
    size_types: SizeTypeExtractor,
    conditions: ConditionExtractor,
    suppliers: SupplierExtractor<'a>,
    references: ReferenceExtractor,
}

impl<'a> ExtractionEngine<'a> {
    /// Create an engine with the default extraction settings.
    pub fn new(directory: &'a SupplierDirectory) -> Self {
        Self::from_config(directory, &ExtractionConfig::default())
    }

    /// Create an engine from configuration.
    pub fn from_config(directory: &'a SupplierDirectory, config: &ExtractionConfig) -> Self {
        Self {
            alignment: config.alignment,
            containers: ContainerIdExtractor::new(),
            size_types: SizeTypeExtractor::with_order(config.size_type_order),
            conditions: ConditionExtractor::new(),
            suppliers: SupplierExtractor::new(directory).with_fallbacks(&config.fallback_suppliers),
            references: ReferenceExtractor::new(),
        }
    }

    /// Set the column alignment strategy.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Replace the supplier keyword fallbacks.
    pub fn with_fallback_suppliers(mut self, fallbacks: &[FallbackSupplier]) -> Self {
        self.suppliers = self.suppliers.with_fallbacks(fallbacks);
        self
    }

    /// Extract aligned columns from a document.
    pub fn extract<D: PageSource + ?Sized>(&self, document: &D) -> ColumnSet {
        self.scan(document).0
    }

    /// Extract records and scan counters from a document.
    pub fn run<D: PageSource + ?Sized>(&self, document: &D) -> ExtractionResult {
        let start = Instant::now();
        let (columns, stats) = self.scan(document);
        let table = build_records(columns);

        ExtractionResult {
            table,
            stats,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn scan<D: PageSource + ?Sized>(&self, document: &D) -> (ColumnSet, ExtractionStats) {
        let mut scan = Scan::default();
        scan.stats.pages_total = document.page_count();

        for page in 1..=scan.stats.pages_total {
            let Some(text) = document.page_text(page) else {
                debug!("Page {} has no extractable text, skipping", page);
                scan.stats.pages_skipped += 1;
                continue;
            };
            scan.stats.pages_with_text += 1;
            self.scan_page(text, &mut scan);
        }

        scan.stats.containers_found = scan.containers.len();
        scan.stats.size_types_found = scan.size_types.len();
        scan.stats.conditions_found = scan.conditions.len();
        scan.stats.suppliers_found = scan.suppliers.clone();
        scan.stats.references_found = scan.references.clone();

        let columns = match self.alignment {
            Alignment::Positional => align_positional(&mut scan),
            Alignment::PerLine => align_per_line(&mut scan),
        };
        scan.stats.rows = columns.len();
        scan.stats.dropped_containers = scan.stats.containers_found - columns.len();

        info!(
            "Scanned {} pages ({} skipped): {} containers, {} size/types, {} conditions -> {} rows",
            scan.stats.pages_total,
            scan.stats.pages_skipped,
            scan.stats.containers_found,
            scan.stats.size_types_found,
            scan.stats.conditions_found,
            scan.stats.rows
        );
        if scan.stats.dropped_containers > 0 {
            debug!(
                "Alignment dropped {} container ids",
                scan.stats.dropped_containers
            );
        }

        (columns, scan.stats)
    }

    fn scan_page(&self, text: &str, scan: &mut Scan) {
        for line in text.lines() {
            let line = line.trim();

            let ids = self.containers.extract_all(line);
            let size_type = self.size_types.extract(line).map(str::to_string);
            let condition = self.conditions.extract(line);

            for id in &ids {
                scan.line_rows.push((id.clone(), size_type.clone(), condition));
            }
            scan.containers.extend(ids);
            if let Some(size_type) = size_type {
                scan.size_types.push(size_type);
            }
            if let Some(condition) = condition {
                scan.conditions.push(condition);
            }
        }

        // Supplier and reference describe the page, not a line
        if let Some(supplier) = self.suppliers.extract_normalized(&normalize(text)) {
            if !scan.suppliers.contains(&supplier) {
                scan.suppliers.push(supplier);
            }
        }
        if let Some(reference) = self.references.extract(text) {
            scan.references.push(reference);
        }
    }
}

/// Truncate the three line columns to the shortest and broadcast the
/// document fields.
fn align_positional(scan: &mut Scan) -> ColumnSet {
    let n = scan
        .containers
        .len()
        .min(scan.size_types.len())
        .min(scan.conditions.len());

    let containers: Vec<String> = scan.containers.drain(..).take(n).collect();
    let size_types = scan.size_types.drain(..).take(n).map(Some).collect();
    let conditions = scan.conditions.drain(..).take(n).map(Some).collect();

    ColumnSet {
        containers,
        size_types,
        conditions,
        suppliers: vec![scan.suppliers.first().cloned(); n],
        references: vec![scan.references.first().cloned(); n],
    }
}

/// One row per container id, with the fields of its own line.
fn align_per_line(scan: &mut Scan) -> ColumnSet {
    let n = scan.line_rows.len();
    let mut columns = ColumnSet {
        suppliers: vec![scan.suppliers.first().cloned(); n],
        references: vec![scan.references.first().cloned(); n],
        ..ColumnSet::default()
    };

    for (id, size_type, condition) in scan.line_rows.drain(..) {
        columns.containers.push(id);
        columns.size_types.push(size_type);
        columns.conditions.push(condition);
    }
    columns
}

impl ReleaseExtractor for ExtractionEngine<'_> {
    fn extract_records(&self, document: &dyn PageSource) -> ExtractionResult {
        self.run(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::TextDocument;
    use pretty_assertions::assert_eq;

    fn directory() -> SupplierDirectory {
        SupplierDirectory::from_entries([
            ("Compañía Sudamericana de Vapores S.A.", "CSAV"),
            ("Hapag-Lloyd AG", "Hapag-Lloyd"),
        ])
    }

    #[test]
    fn test_single_line_scenario() {
        let directory = directory();
        let engine = ExtractionEngine::new(&directory);
        let columns = engine.extract(&TextDocument::new("TCLU1234567 40HIGH As Is"));

        assert_eq!(columns.containers, vec!["TCLU1234567"]);
        assert_eq!(columns.size_types, vec![Some("40'HC".to_string())]);
        assert_eq!(columns.conditions, vec![Some(Condition::AsIs)]);
        assert_eq!(columns.suppliers, vec![None]);
        assert_eq!(columns.references, vec![None]);
    }

    #[test]
    fn test_positional_alignment_truncates_to_shortest() {
        let text = "\
TCLU1000001 20DRY As Is
TCLU1000002 40DRY Damage
TCLU1000003 40HIGH New
TCLU1000004 IICL
TCLU1000005
";
        let directory = directory();
        let engine = ExtractionEngine::new(&directory);
        let result = engine.run(&TextDocument::new(text));

        assert_eq!(result.table.len(), 3);
        assert_eq!(result.stats.containers_found, 5);
        assert_eq!(result.stats.size_types_found, 3);
        assert_eq!(result.stats.conditions_found, 4);
        assert_eq!(result.stats.dropped_containers, 2);

        let ids: Vec<_> = result.table.iter().map(|r| r.container_id.as_str()).collect();
        assert_eq!(ids, vec!["TCLU1000001", "TCLU1000002", "TCLU1000003"]);
    }

    #[test]
    fn test_positional_alignment_pairs_by_index_not_line() {
        // size/type appears on a header line, shifting pairing
        let text = "Equipment 20DRY\nTCLU1000001 As Is\nTCLU1000002 40HIGH Damage";
        let directory = directory();
        let columns = ExtractionEngine::new(&directory).extract(&TextDocument::new(text));

        assert_eq!(columns.len(), 2);
        assert_eq!(columns.size_types[0].as_deref(), Some("20'DV"));
        assert_eq!(columns.size_types[1].as_deref(), Some("40'HC"));
    }

    #[test]
    fn test_per_line_alignment_keeps_every_container() {
        let text = "Equipment 20DRY\nTCLU1000001 As Is\nTCLU1000002 40HIGH Damage\nTCLU1000003";
        let directory = directory();
        let engine = ExtractionEngine::new(&directory).with_alignment(Alignment::PerLine);
        let result = engine.run(&TextDocument::new(text));

        assert_eq!(result.table.len(), 3);
        assert_eq!(result.stats.dropped_containers, 0);

        let records = result.table.records();
        assert_eq!(records[0].size_type, None);
        assert_eq!(records[0].condition, Some(Condition::AsIs));
        assert_eq!(records[1].size_type.as_deref(), Some("40'HC"));
        assert_eq!(records[1].condition, Some(Condition::Damage));
        assert_eq!(records[2].size_type, None);
        assert_eq!(records[2].condition, None);
    }

    #[test]
    fn test_multiple_containers_on_one_line() {
        let text = "TCLU1000001 TCLU1000002 40HIGH As Is";
        let directory = directory();
        let per_line = ExtractionEngine::new(&directory)
            .with_alignment(Alignment::PerLine)
            .extract(&TextDocument::new(text));
        assert_eq!(per_line.len(), 2);
        assert_eq!(per_line.size_types, vec![Some("40'HC".to_string()); 2]);

        let positional = ExtractionEngine::new(&directory).extract(&TextDocument::new(text));
        assert_eq!(positional.containers, vec!["TCLU1000001"]);
    }

    #[test]
    fn test_supplier_and_reference_broadcast_first_seen() {
        let pages = [
            "HAPAG-LLOYD A.G.\nInvoice No: INV77\nTCLU1000001 20DRY As Is",
            "Compañía Sudamericana de Vapores\nProforma Invoice No: PI-2\nTCLU1000002 40DRY New",
        ];
        let directory = directory();
        let result = ExtractionEngine::new(&directory).run(&TextDocument::from_pages(pages));

        assert_eq!(result.stats.suppliers_found, vec!["Hapag-Lloyd"]);
        assert_eq!(result.stats.references_found, vec!["INV77", "PI-2"]);
        for record in &result.table {
            assert_eq!(record.supplier.as_deref(), Some("Hapag-Lloyd"));
            assert_eq!(record.reference.as_deref(), Some("INV77"));
        }
    }

    #[test]
    fn test_accented_supplier_name_in_mixed_case() {
        let text = "cOMPAÑIA SUDAMÉRICANA DE VAPORES s.a.\nTCLU1000001 20DRY As Is";
        let directory = directory();
        let columns = ExtractionEngine::new(&directory).extract(&TextDocument::new(text));
        assert_eq!(columns.suppliers, vec![Some("CSAV".to_string())]);
    }

    #[test]
    fn test_fallback_supplier() {
        let text = "MAERSK release\nTCLU1000001 20DRY As Is";
        let directory = SupplierDirectory::empty();

        let columns = ExtractionEngine::new(&directory).extract(&TextDocument::new(text));
        assert_eq!(columns.suppliers, vec![Some("Maersk".to_string())]);

        let columns = ExtractionEngine::new(&directory)
            .with_fallback_suppliers(&[])
            .extract(&TextDocument::new(text));
        assert_eq!(columns.suppliers, vec![None]);
    }

    #[test]
    fn test_declared_size_type_order_from_config() {
        use crate::models::config::SizeTypeOrder;

        let directory = directory();
        let text = "TCLU1000001 40HIGHFLAT As Is";

        let columns = ExtractionEngine::new(&directory).extract(&TextDocument::new(text));
        assert_eq!(columns.size_types, vec![Some("40'HFR".to_string())]);

        let config = ExtractionConfig {
            size_type_order: SizeTypeOrder::Declared,
            ..ExtractionConfig::default()
        };
        let columns = ExtractionEngine::from_config(&directory, &config)
            .extract(&TextDocument::new(text));
        assert_eq!(columns.size_types, vec![Some("40'HC".to_string())]);
    }

    #[test]
    fn test_blank_pages_are_skipped() {
        let directory = directory();
        let doc = TextDocument::from_pages(["", "TCLU1000001 20DRY As Is", "   "]);
        let result = ExtractionEngine::new(&directory).run(&doc);

        assert_eq!(result.stats.pages_total, 3);
        assert_eq!(result.stats.pages_skipped, 2);
        assert_eq!(result.table.len(), 1);
    }

    #[test]
    fn test_empty_document_yields_no_records() {
        let directory = directory();
        let result = ExtractionEngine::new(&directory).run(&TextDocument::new(""));
        assert!(result.table.is_empty());
        assert_eq!(result.stats.rows, 0);
    }

    #[test]
    fn test_no_containers_with_other_fields() {
        let directory = directory();
        let columns = ExtractionEngine::new(&directory)
            .extract(&TextDocument::new("Invoice No: INV1\n40HIGH As Is"));
        assert!(columns.is_empty());
        assert!(columns.is_aligned());
        assert!(columns.references.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "Hapag-Lloyd AG\nTCLU1000001 20DRY As Is\nMSKU2000002 45HIGH IICL\nInvoice No: X-1";
        let doc = TextDocument::new(text);
        let directory = directory();
        let engine = ExtractionEngine::new(&directory);
        assert_eq!(engine.extract(&doc), engine.extract(&doc));
    }

    #[test]
    fn test_alignment_law() {
        let samples = [
            "TCLU1000001\nTCLU1000002 20DRY\nNew",
            "20DRY 40DRY\nAs Is\nTCLU1000001",
            "TCLU1000001 TCLU1000002 TCLU1000003 40HIGH Damage\n45HIGH Recycle",
            "nothing",
        ];
        let directory = directory();
        let engine = ExtractionEngine::new(&directory);
        for text in samples {
            let result = engine.run(&TextDocument::new(text));
            let expected = result
                .stats
                .containers_found
                .min(result.stats.size_types_found)
                .min(result.stats.conditions_found);
            assert_eq!(result.table.len(), expected, "sample {:?}", text);
            assert!(result.table.iter().all(|r| r.supplier.is_none() && r.reference.is_none()));
        }
    }

    #[test]
    fn test_release_extractor_from_text() {
        let directory = directory();
        let engine = ExtractionEngine::new(&directory);
        let result = engine.extract_text("TCLU1234567 40HIGHFLAT Recycle");
        assert_eq!(result.table.records()[0].size_type.as_deref(), Some("40'HFR"));
    }
}
