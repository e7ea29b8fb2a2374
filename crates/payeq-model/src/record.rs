use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{EmployeeStatus, Gender, RaceEth, TitleClassification};

/// One payroll entry with its derived attributes.
///
/// Source fields are populated by the deriver from the normalized frame;
/// derived fields are computed in the same pass and never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    // Pass-through identifiers.
    pub fiscal_year: Option<String>,
    pub payroll_number: Option<String>,
    pub agency_code: Option<String>,
    pub employee_id: Option<String>,

    pub agency: String,
    pub start_date: NaiveDate,
    pub date_of_birth: NaiveDate,
    pub title_code: String,
    pub title_name: String,
    pub base_salary: f64,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub employee_status: EmployeeStatus,
    pub title_classification: TitleClassification,
    pub gender: Gender,
    pub race: String,
    pub ethnicity: String,

    pub days_from_start: i64,
    pub years_from_start: i64,
    pub age_years: i64,
    pub race_eth: RaceEth,
    pub nonwhite: bool,
    pub nonwhite_female: bool,
    /// None when no uniform-title reference list was supplied.
    pub uniform: Option<bool>,
}
