//! Error types for the stroke preprocessing pipeline

use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PreprocessError>;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("unexpected value {value:?} in column {column}")]
    UnexpectedCategory { column: String, value: Option<String> },

    #[error("cannot parse {value:?} in column {column} as a number")]
    InvalidNumber { column: String, value: String },

    #[error("column {0} has no usable values")]
    EmptyColumn(String),

    #[error("invalid config {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data error: {0}")]
    Polars(#[from] PolarsError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
