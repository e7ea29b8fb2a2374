//! Payroll ingestion: CSV loading, column normalization and the
//! uniform-title reference list.

pub mod error;
pub mod normalize;
pub mod reader;
pub mod uniform;

pub use error::{IngestError, Result};
pub use normalize::{ensure_required_columns, normalize_columns};
pub use reader::{read_payroll_csv, string_values};
pub use uniform::load_uniform_titles;
