//! Error types for payroll ingestion.

use std::path::PathBuf;

use payeq_model::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading and normalizing input tables.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to read a reference list.
    #[error("failed to read reference list {path}: {source}")]
    ReferenceRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required column not found in a reference list.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// The table does not match the canonical schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::error::PolarsError> for IngestError {
    fn from(err: polars::error::PolarsError) -> Self {
        IngestError::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
