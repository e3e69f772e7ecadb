//! Customer name extraction.

use super::patterns::CUSTOMER;
use super::FieldExtractor;

/// Extracts the text between `Customer: ` and the first following ` Items:`.
///
/// The capture is returned verbatim, surrounding whitespace included. A name
/// that itself contains ` Items:` is cut at that point.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerExtractor;

impl CustomerExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for CustomerExtractor {
    type Output = String;

    fn extract(&self, line: &str) -> Option<Self::Output> {
        CUSTOMER.captures(line).map(|caps| caps[1].to_string())
    }
}
