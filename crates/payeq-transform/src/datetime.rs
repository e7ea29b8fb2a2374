//! Date parsing and tenure/age arithmetic.
//!
//! All spans are measured against December 31st of the reference year.

use chrono::{NaiveDate, NaiveDateTime};
use payeq_model::ConfigError;

const DAYS_PER_YEAR: f64 = 365.0;

/// Parse a payroll date cell.
///
/// Accepts ISO dates, ISO datetimes (with `T` or space separator) and US
/// `MM/DD/YYYY` dates with an optional time part. The time component is
/// discarded.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_date(trimmed).or_else(|| try_parse_datetime(trimmed).map(|dt| dt.date()))
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = ["%Y-%m-%d", "%m/%d/%Y"];
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %I:%M:%S %p",
    ];
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// December 31st of the reference year.
pub fn reference_date(year: i32) -> Result<NaiveDate, ConfigError> {
    NaiveDate::from_ymd_opt(year, 12, 31).ok_or(ConfigError::InvalidReferenceYear(year))
}

/// Days between a start date and the reference date.
pub fn days_from_start(start: NaiveDate, reference: NaiveDate) -> i64 {
    (reference - start).num_days()
}

/// Tenure in whole years, rounded to nearest.
///
/// A day count never lands exactly on a half year, so the tie rule does
/// not matter.
pub fn years_from_start(days: i64) -> i64 {
    (days as f64 / DAYS_PER_YEAR).round() as i64
}

/// Age in completed 365-day years at the reference date.
pub fn age_years(date_of_birth: NaiveDate, reference: NaiveDate) -> i64 {
    ((reference - date_of_birth).num_days() as f64 / DAYS_PER_YEAR).floor() as i64
}
