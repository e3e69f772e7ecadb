//! Order number extraction.

use crate::models::order::OrderId;

use super::patterns::ORDER_ID;
use super::FieldExtractor;

/// Extracts the number following `Order #`.
///
/// The number may be arbitrarily long. Only ASCII digits count; other
/// Unicode decimal digits end the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderIdExtractor;

impl OrderIdExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for OrderIdExtractor {
    type Output = OrderId;

    fn extract(&self, line: &str) -> Option<Self::Output> {
        ORDER_ID
            .captures(line)
            .and_then(|caps| OrderId::from_digits(&caps[1]))
    }
}
