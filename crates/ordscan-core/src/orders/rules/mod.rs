//! Rule-based field extractors for order lines.

pub mod customer;
pub mod items;
pub mod order_id;
pub mod patterns;

pub use customer::CustomerExtractor;
pub use items::{count_items, ItemsExtractor};
pub use order_id::OrderIdExtractor;
pub use patterns::*;

/// Trait for field extractors.
///
/// Each extractor searches the whole line on its own; `None` means the
/// field's marker was not found.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from a line.
    fn extract(&self, line: &str) -> Option<Self::Output>;
}
