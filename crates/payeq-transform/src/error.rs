//! Error types for attribute derivation.

use payeq_ingest::IngestError;
use payeq_model::{ConfigError, ParseError, SchemaError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::error::PolarsError> for TransformError {
    fn from(err: polars::error::PolarsError) -> Self {
        TransformError::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<IngestError> for TransformError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Schema(schema) => TransformError::Schema(schema),
            other => TransformError::DataFrame {
                message: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
