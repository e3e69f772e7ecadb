//! Error types for the ordscan-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the ordscan library.
#[derive(Error, Debug)]
pub enum OrdscanError {
    /// The line source could not be opened or read.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Failures of the line source feeding the parser.
///
/// These are the only failures the parser propagates; a line that does not
/// look like an order is never an error.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading failed part way through the source.
    #[error("read failed after line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the configuration file.
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for the schema.
    #[error("invalid configuration in {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for the ordscan library.
pub type Result<T> = std::result::Result<T, OrdscanError>;
