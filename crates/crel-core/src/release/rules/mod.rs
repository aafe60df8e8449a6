//! Rule-based field extractors for container release documents.
//!
//! Line-scoped extractors (container ids, size/type, condition) look at a
//! single trimmed line. Page-scoped extractors (supplier, reference) look at
//! the whole page text.

pub mod condition;
pub mod container;
pub mod normalize;
pub mod patterns;
pub mod reference;
pub mod size_type;
pub mod supplier;

pub use condition::{extract_condition, ConditionExtractor};
pub use container::{extract_container_ids, ContainerIdExtractor};
pub use normalize::normalize;
pub use reference::{extract_reference, ReferenceExtractor};
pub use size_type::{extract_size_type, SizeTypeExtractor, SIZE_TYPE_CODES};
pub use supplier::SupplierExtractor;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
