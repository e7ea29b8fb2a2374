//! Pay-equity reports over enriched payroll records.
//!
//! - **gender**: male/female composition of an agency's titles
//! - **race_eth**: race/ethnicity composition with salary ranking
//! - **share**: per-title share of a categorical value, binned
//! - **populous**: most populous titles per agency
//!
//! Every report rounds numeric cells to two decimals and silently drops
//! titles below its small-cell threshold.

mod common;
pub mod error;
pub mod gender;
pub mod populous;
pub mod race_eth;
pub mod share;

pub use common::{DECIMALS, EXPORT_MIN_CELL, MIN_TITLE_COUNT};
pub use error::{ReportError, Result};
pub use gender::{EXPORT_COLUMNS, GenderOptions, gender_composition};
pub use populous::{POPULOUS_COLUMNS, populous_title_profile};
pub use race_eth::{
    HighLow, MIN_RANKED_MEDIAN, RaceEthOptions, RaceEthReport, SpreadFormat, race_eth_composition,
};
pub use share::{SHARE_BIN_WIDTH, ShareOptions, share_by_variable};
