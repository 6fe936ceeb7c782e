//! Error types for the data-loader crate.
//!
//! Only input that violates the expected shape is an error here. Catalog
//! conditions that have a defined policy (duplicate ids) are reported as
//! values on the index, not through this type.

use thiserror::Error;

/// Errors that can occur while reading catalog and rating sources
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A row couldn't be parsed (missing field, malformed number, ...)
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A field parsed but holds a value we cannot accept
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

impl DataLoadError {
    /// Wrap a csv error with the label of the source it came from.
    pub(crate) fn from_csv(file: &str, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(io) => DataLoadError::IoError(io),
            csv::ErrorKind::Deserialize { err, .. } => DataLoadError::ParseError {
                file: file.to_string(),
                line,
                reason: err.to_string(),
            },
            other => DataLoadError::ParseError {
                file: file.to_string(),
                line,
                reason: format!("{:?}", other),
            },
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
