use payeq_model::Field;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// An aggregation or group key is not valid for the field kind.
    #[error("invalid aggregation on {field}: {reason}")]
    InvalidAggregation { field: Field, reason: &'static str },

    #[error("aggregation '{0}' has no source field")]
    MissingAggregationField(String),

    #[error("column '{0}' not found")]
    UnknownColumn(String),

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("row has {actual} values, table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },

    /// Two rows share the same identity and pivot key.
    #[error("pivot on '{key_column}' has more than one value for '{key}'")]
    DuplicatePivotKey { key_column: String, key: String },

    #[error("invalid binning: {0}")]
    InvalidBinning(&'static str),

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::error::PolarsError> for CoreError {
    fn from(err: polars::error::PolarsError) -> Self {
        CoreError::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
