//! Error types for schedule ingestion, validation and export.

use std::path::PathBuf;

use polars::prelude::PolarsError;

/// Result type for schedule operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Error type for schedule operations
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid value '{value}' in column {column} at row {row}")]
    InvalidField {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Invalid slot interval [{begin}, {end})")]
    InvalidInterval { begin: u32, end: u32 },

    #[error("Malformed record {id} at row {row}: {reason}")]
    MalformedRecord { id: i64, row: usize, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ScheduleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScheduleError::Io {
            path: path.into(),
            source,
        }
    }
}
