//! CSV loading into Polars DataFrames.

use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads a payroll CSV into a DataFrame.
///
/// Every column is read as text; coercion happens in the deriver so that
/// malformed cells surface as row-level parse errors rather than as a
/// failed load.
pub fn read_payroll_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "payroll csv loaded"
    );
    Ok(df)
}

/// Extracts a column as trimmed optional strings; empty cells become None.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| payeq_model::SchemaError::MissingColumn(name.to_string()))?
        .cast(&DataType::String)?;
    let values = column
        .str()?
        .into_iter()
        .map(|value| {
            value
                .map(str::trim)
                .filter(|trimmed| !trimmed.is_empty())
                .map(str::to_string)
        })
        .collect();
    Ok(values)
}
