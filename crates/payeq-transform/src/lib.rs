//! Attribute derivation for payroll records.
//!
//! - **datetime**: date parsing and tenure/age arithmetic
//! - **demographics**: race/ethnicity category and non-white flags
//! - **filter**: employee-status filter profiles and salary suppression
//! - **derive**: the frame-to-records deriver
//! - **frame**: records back to a DataFrame for export

pub mod datetime;
pub mod demographics;
pub mod derive;
pub mod error;
pub mod filter;
pub mod frame;

pub use derive::{Derived, derive, parse_amount};
pub use error::{Result, TransformError};
pub use frame::records_to_frame;
