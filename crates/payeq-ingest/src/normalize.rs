//! Record normalizer: renames raw input columns to the canonical schema.
//!
//! No values are coerced here. The only outputs are a renamed frame or a
//! [`SchemaError`].

use std::collections::BTreeSet;

use payeq_model::schema::REQUIRED_COLUMNS;
use payeq_model::{ColumnNames, SchemaError};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::Result;

/// Applies canonical column names to a raw payroll frame.
///
/// With [`ColumnNames::Default`], a frame whose headers already carry every
/// required canonical name is accepted as-is, whatever its column order;
/// otherwise the 25-column default layout is applied positionally. With
/// [`ColumnNames::Explicit`], the supplied names are applied positionally.
///
/// # Errors
///
/// Returns [`SchemaError::ColumnCountMismatch`] when the name list length
/// differs from the frame width, [`SchemaError::DuplicateColumn`] for
/// repeated names, and [`SchemaError::MissingColumn`] when a column the
/// deriver needs is absent after renaming.
pub fn normalize_columns(mut df: DataFrame, names: &ColumnNames) -> Result<DataFrame> {
    if matches!(names, ColumnNames::Default) && has_canonical_headers(&df) {
        debug!(columns = df.width(), "input already uses canonical column names");
        return Ok(df);
    }

    let targets = names.names();
    if targets.len() != df.width() {
        return Err(SchemaError::ColumnCountMismatch {
            expected: targets.len(),
            actual: df.width(),
        }
        .into());
    }
    let mut seen = BTreeSet::new();
    for name in &targets {
        if !seen.insert(name.as_str()) {
            return Err(SchemaError::DuplicateColumn(name.clone()).into());
        }
    }

    df.set_column_names(targets.iter().map(String::as_str))?;
    ensure_required_columns(&df)?;
    debug!(columns = df.width(), "applied canonical column names");
    Ok(df)
}

fn has_canonical_headers(df: &DataFrame) -> bool {
    let present: BTreeSet<&str> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    REQUIRED_COLUMNS.iter().all(|name| present.contains(name))
}

/// Checks that every column required for derivation is present.
pub fn ensure_required_columns(df: &DataFrame) -> std::result::Result<(), SchemaError> {
    let present: BTreeSet<&str> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    match REQUIRED_COLUMNS
        .iter()
        .find(|name| !present.contains(*name))
    {
        Some(missing) => Err(SchemaError::MissingColumn((*missing).to_string())),
        None => Ok(()),
    }
}
