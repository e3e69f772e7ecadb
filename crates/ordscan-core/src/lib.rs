//! Core library for extracting order records from noisy text.
//!
//! This crate provides:
//! - Order line classification and field extraction (order number, customer, items)
//! - Item list normalization into frequency tables
//! - An aggregator collecting orders in input order
//! - Line sources over readers, files and in-memory sequences
//! - Configuration models

pub mod error;
pub mod models;
pub mod orders;
pub mod source;

pub use error::{ConfigError, OrdscanError, Result, SourceError};
pub use models::config::{OrdscanConfig, OutputFormat, ParserConfig};
pub use models::order::{format_items, ItemCounts, Order, OrderId};
pub use orders::{LineRejection, OrdersParser, ParseStats};
pub use source::{open_file, IterSource, LineSource, ReaderSource};

/// Parse every line of a file.
///
/// The only failure is the file being unavailable or unreadable; lines that
/// are not orders are skipped.
pub fn parse_file(path: &std::path::Path, config: &ParserConfig) -> Result<OrdersParser> {
    let mut source = open_file(path)?;
    let mut parser = OrdersParser::from_config(config);
    parser.parse_source(&mut source)?;
    Ok(parser)
}
