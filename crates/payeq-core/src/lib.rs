//! Aggregation engine for payroll records.
//!
//! Reports are assembled from a handful of table primitives:
//!
//! - **summarize**: group records by categorical fields and aggregate
//! - **pivot**: spread a key column into one column per level
//! - **percent**: row-wise percentage over a set of category columns
//! - **topn**: stable top-N within groups
//! - **binning**: fixed-width interval assignment
//! - **join**: hash join between tables
//!
//! All of them produce a [`Table`], which converts to a Polars DataFrame.

pub mod binning;
pub mod error;
pub mod join;
pub mod percent;
pub mod pivot;
pub mod summarize;
pub mod table;
pub mod topn;

pub use binning::{Bin, Binning};
pub use error::{CoreError, Result};
pub use join::{JoinKind, hash_join};
pub use percent::{PERCENT_PREFIX, percentage_of};
pub use pivot::pivot;
pub use summarize::{
    AggOp, Aggregation, AggregationSpec, Groups, group_records, group_summarize, mean, median,
};
pub use table::{RowRef, SortOrder, Table, Value, format_number};
pub use topn::top_n_per_group;
