//! Item list extraction and counting.

use crate::models::order::ItemCounts;

use super::patterns::ITEMS;
use super::FieldExtractor;

/// Extracts the item list after `Items: ` as a frequency table.
#[derive(Debug, Clone, Copy)]
pub struct ItemsExtractor {
    keep_empty: bool,
}

impl ItemsExtractor {
    /// Create an extractor that counts empty tokens under `""`.
    pub fn new() -> Self {
        Self { keep_empty: true }
    }

    /// Set whether empty tokens are counted or dropped.
    pub fn with_empty_items(mut self, keep: bool) -> Self {
        self.keep_empty = keep;
        self
    }
}

impl Default for ItemsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ItemsExtractor {
    type Output = ItemCounts;

    fn extract(&self, line: &str) -> Option<Self::Output> {
        ITEMS
            .captures(line)
            .map(|caps| count_items(&caps[1], self.keep_empty))
    }
}

/// Split a comma separated list, trim each token and count equal tokens.
///
/// Matching is exact and case-sensitive. With `keep_empty`, blank tokens
/// (trailing commas, an empty segment) are counted under the empty string.
pub fn count_items(segment: &str, keep_empty: bool) -> ItemCounts {
    let mut counts = ItemCounts::new();
    for token in segment.split(',').map(str::trim) {
        if token.is_empty() && !keep_empty {
            continue;
        }
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }
    counts
}
