//! Employee-status filter profiles.

use payeq_model::{EmployeeRecord, EmployeeStatus, StatusFilter};

const FULL_TIME_MIN_SALARY: f64 = 15000.0;
const FULL_TIME_MIN_AGE: i64 = 16;
const PART_TIME_MIN_SALARY: f64 = 13.0;
// TODO: confirm the part-time age floor with the product owner; 1 looks
// like a typo for the full-time 16.
const PART_TIME_MIN_AGE: i64 = 1;

/// Whether a record survives the selected filter profile.
pub fn keep_record(filter: StatusFilter, record: &EmployeeRecord) -> bool {
    match filter {
        StatusFilter::FullTime => {
            record.employee_status == EmployeeStatus::FullTime
                && record.base_salary >= FULL_TIME_MIN_SALARY
                && record.age_years >= FULL_TIME_MIN_AGE
                && record.title_classification.is_classified()
        }
        StatusFilter::PartTime => {
            record.employee_status == EmployeeStatus::PartTime
                && record.base_salary >= PART_TIME_MIN_SALARY
                && record.age_years >= PART_TIME_MIN_AGE
                && record.title_classification.is_classified()
        }
        StatusFilter::All => true,
    }
}

/// Salary bounds below this floor on a full-time record are treated as
/// miscoded and dropped.
pub const SALARY_FLOOR: f64 = 15000.0;

/// Null the salary range when a full-time record carries an implausible
/// minimum salary.
pub fn suppress_salary_range(
    status: &EmployeeStatus,
    min_salary: Option<f64>,
    max_salary: Option<f64>,
) -> (Option<f64>, Option<f64>) {
    match min_salary {
        Some(min) if min < SALARY_FLOOR && *status == EmployeeStatus::FullTime => (None, None),
        _ => (min_salary, max_salary),
    }
}
