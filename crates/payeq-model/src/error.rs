//! Error types shared across the payroll pipeline.
//!
//! The pipeline distinguishes three fatal error classes:
//!
//! - [`ConfigError`]: required run parameters are missing
//! - [`SchemaError`]: the input table does not match the canonical schema
//! - [`ParseError`]: a date or numeric cell cannot be coerced
//!
//! Small-cell suppression is never an error; filtered rows simply do not
//! appear in report output.

use thiserror::Error;

/// Required configuration is missing or invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No reference year was supplied to the deriver.
    #[error("reference year is required to derive tenure and age")]
    MissingReferenceYear,

    /// The reference year cannot form a valid calendar date.
    #[error("reference year {0} is out of range")]
    InvalidReferenceYear(i32),
}

/// The input table does not match the expected column layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The number of target names differs from the number of input columns.
    #[error("column count mismatch: input has {actual} columns, {expected} names supplied")]
    ColumnCountMismatch { expected: usize, actual: usize },

    /// A column required by the deriver is absent after renaming.
    #[error("required column '{0}' not found")]
    MissingColumn(String),

    /// Two target names collide.
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}

/// A cell could not be coerced to its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: cannot parse {column} value '{value}' as {expected}")]
pub struct ParseError {
    /// 1-based data row number.
    pub row: usize,
    pub column: String,
    pub value: String,
    pub expected: &'static str,
}

impl ParseError {
    pub fn new(
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self {
            row,
            column: column.into(),
            value: value.into(),
            expected,
        }
    }
}
