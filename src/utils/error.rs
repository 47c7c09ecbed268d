//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading a data source
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Fetch of {0} timed out")]
    Timeout(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error(transparent)]
    Table(#[from] ParseError),

    #[error("Load of {0} was superseded by a newer request")]
    Superseded(String),
}

/// Errors that can occur while parsing tabular input
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Table has no header row")]
    MissingHeader,

    #[error("Row {row} ({row_key}): cell {value:?} in column {column:?} is not a number")]
    InvalidNumber {
        row: usize,
        row_key: String,
        column: String,
        value: String,
    },

    #[error("Row {row} ({row_key}) has {cells} cells but the header names only {columns}")]
    RaggedRow {
        row: usize,
        row_key: String,
        cells: usize,
        columns: usize,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Invalid mount point: {0:?}")]
    InvalidMount(String),
}
