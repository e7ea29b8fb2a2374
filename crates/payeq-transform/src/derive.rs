//! Attribute deriver: turns a normalized payroll frame into enriched
//! employee records and applies the employee-status filter.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use payeq_ingest::{ensure_required_columns, string_values};
use payeq_model::schema::{
    AGENCY, AGENCY_CODE, BASE_SALARY, DATE_OF_BIRTH, EMPLOYEE_ID, EMPLOYEE_STATUS, ETHNICITY,
    FISCAL_YEAR, GENDER, MAX_SALARY, MIN_SALARY, PAYROLL_NUMBER, RACE, START_DATE,
    TITLE_CLASSIFICATION, TITLE_CODE, TITLE_NAME,
};
use payeq_model::{
    ConfigError, DeriveOptions, EmployeeRecord, EmployeeStatus, Gender, ParseError, ParsePolicy,
    TitleClassification,
};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use crate::datetime::{age_years, days_from_start, parse_date, reference_date, years_from_start};
use crate::demographics::{is_nonwhite, is_nonwhite_female, race_eth};
use crate::error::Result;
use crate::filter::{keep_record, suppress_salary_range};

/// Output of [`derive`].
#[derive(Debug, Clone, Default)]
pub struct Derived {
    pub records: Vec<EmployeeRecord>,
    /// Rows in the input frame.
    pub input_rows: usize,
    /// Malformed rows dropped under [`ParsePolicy::SkipMalformed`].
    pub skipped: usize,
    /// Error for the first of the `skipped` rows.
    pub first_malformed: Option<ParseError>,
    /// Rows removed by the employee-status filter.
    pub filtered_out: usize,
}

/// Column values pulled out of the frame once, indexed by row.
struct SourceColumns {
    fiscal_year: Option<Vec<Option<String>>>,
    payroll_number: Option<Vec<Option<String>>>,
    agency_code: Option<Vec<Option<String>>>,
    employee_id: Option<Vec<Option<String>>>,
    agency: Vec<Option<String>>,
    start_date: Vec<Option<String>>,
    date_of_birth: Vec<Option<String>>,
    title_code: Vec<Option<String>>,
    title_name: Vec<Option<String>>,
    title_classification: Vec<Option<String>>,
    employee_status: Vec<Option<String>>,
    base_salary: Vec<Option<String>>,
    min_salary: Vec<Option<String>>,
    max_salary: Vec<Option<String>>,
    gender: Vec<Option<String>>,
    race: Vec<Option<String>>,
    ethnicity: Vec<Option<String>>,
}

impl SourceColumns {
    fn read(df: &DataFrame) -> Result<Self> {
        let optional = |name: &str| -> Result<Option<Vec<Option<String>>>> {
            if df.column(name).is_ok() {
                Ok(Some(string_values(df, name)?))
            } else {
                Ok(None)
            }
        };
        Ok(Self {
            fiscal_year: optional(FISCAL_YEAR)?,
            payroll_number: optional(PAYROLL_NUMBER)?,
            agency_code: optional(AGENCY_CODE)?,
            employee_id: optional(EMPLOYEE_ID)?,
            agency: string_values(df, AGENCY)?,
            start_date: string_values(df, START_DATE)?,
            date_of_birth: string_values(df, DATE_OF_BIRTH)?,
            title_code: string_values(df, TITLE_CODE)?,
            title_name: string_values(df, TITLE_NAME)?,
            title_classification: string_values(df, TITLE_CLASSIFICATION)?,
            employee_status: string_values(df, EMPLOYEE_STATUS)?,
            base_salary: string_values(df, BASE_SALARY)?,
            min_salary: string_values(df, MIN_SALARY)?,
            max_salary: string_values(df, MAX_SALARY)?,
            gender: string_values(df, GENDER)?,
            race: string_values(df, RACE)?,
            ethnicity: string_values(df, ETHNICITY)?,
        })
    }
}

fn cell(values: &[Option<String>], idx: usize) -> &str {
    values.get(idx).and_then(Option::as_deref).unwrap_or("")
}

fn optional_cell(values: Option<&Vec<Option<String>>>, idx: usize) -> Option<String> {
    values.and_then(|values| values.get(idx).cloned().flatten())
}

/// Parse a salary amount, tolerating a leading `$` and thousands separators.
pub fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

fn required_date(
    values: &[Option<String>],
    idx: usize,
    column: &str,
) -> std::result::Result<NaiveDate, ParseError> {
    let raw = cell(values, idx);
    parse_date(raw).ok_or_else(|| ParseError::new(idx + 1, column, raw, "date"))
}

fn optional_amount(
    values: &[Option<String>],
    idx: usize,
    column: &str,
) -> std::result::Result<Option<f64>, ParseError> {
    let raw = cell(values, idx);
    if raw.is_empty() {
        return Ok(None);
    }
    parse_amount(raw)
        .map(Some)
        .ok_or_else(|| ParseError::new(idx + 1, column, raw, "number"))
}

fn build_record(
    columns: &SourceColumns,
    idx: usize,
    reference: NaiveDate,
    uniform_titles: Option<&BTreeSet<String>>,
) -> std::result::Result<EmployeeRecord, ParseError> {
    let start_date = required_date(&columns.start_date, idx, START_DATE)?;
    let date_of_birth = required_date(&columns.date_of_birth, idx, DATE_OF_BIRTH)?;
    let raw_salary = cell(&columns.base_salary, idx);
    let base_salary = parse_amount(raw_salary)
        .ok_or_else(|| ParseError::new(idx + 1, BASE_SALARY, raw_salary, "number"))?;
    let min_salary = optional_amount(&columns.min_salary, idx, MIN_SALARY)?;
    let max_salary = optional_amount(&columns.max_salary, idx, MAX_SALARY)?;

    let employee_status = EmployeeStatus::parse(cell(&columns.employee_status, idx));
    let (min_salary, max_salary) = suppress_salary_range(&employee_status, min_salary, max_salary);
    let gender = Gender::parse(cell(&columns.gender, idx));
    let race = cell(&columns.race, idx).to_string();
    let ethnicity = cell(&columns.ethnicity, idx).to_string();
    let title_code = cell(&columns.title_code, idx).to_string();

    let days = days_from_start(start_date, reference);
    let nonwhite = is_nonwhite(&race, &ethnicity);
    let uniform = uniform_titles.map(|titles| titles.contains(&title_code));

    Ok(EmployeeRecord {
        fiscal_year: optional_cell(columns.fiscal_year.as_ref(), idx),
        payroll_number: optional_cell(columns.payroll_number.as_ref(), idx),
        agency_code: optional_cell(columns.agency_code.as_ref(), idx),
        employee_id: optional_cell(columns.employee_id.as_ref(), idx),
        agency: cell(&columns.agency, idx).to_string(),
        start_date,
        date_of_birth,
        title_name: cell(&columns.title_name, idx).to_string(),
        base_salary,
        min_salary,
        max_salary,
        title_classification: TitleClassification::parse(cell(&columns.title_classification, idx)),
        days_from_start: days,
        years_from_start: years_from_start(days),
        age_years: age_years(date_of_birth, reference),
        race_eth: race_eth(&race, &ethnicity),
        nonwhite,
        nonwhite_female: is_nonwhite_female(nonwhite, &gender),
        uniform,
        employee_status,
        gender,
        race,
        ethnicity,
        title_code,
    })
}

/// Derive enriched records from a normalized payroll frame.
///
/// # Errors
///
/// - [`ConfigError::MissingReferenceYear`] when no reference year is set;
///   checked before any row is read.
/// - [`SchemaError`](payeq_model::SchemaError) when a required column is
///   absent.
/// - [`ParseError`] for the first malformed row under
///   [`ParsePolicy::FailBatch`].
pub fn derive(df: &DataFrame, options: &DeriveOptions) -> Result<Derived> {
    let year = options
        .reference_year
        .ok_or(ConfigError::MissingReferenceYear)?;
    let reference = reference_date(year)?;
    let span = info_span!("derive", reference_year = year, rows = df.height());
    let _guard = span.enter();

    ensure_required_columns(df)?;
    let columns = SourceColumns::read(df)?;
    let input_rows = df.height();
    let uniform_titles = options.uniform_titles.as_ref();

    let mut records = Vec::with_capacity(input_rows);
    let mut skipped = 0usize;
    let mut first_malformed = None;
    for idx in 0..input_rows {
        match build_record(&columns, idx, reference, uniform_titles) {
            Ok(record) => records.push(record),
            Err(error) => match options.parse_policy {
                ParsePolicy::FailBatch => return Err(error.into()),
                ParsePolicy::SkipMalformed => {
                    debug!(row = error.row, column = %error.column, "skipping malformed row");
                    skipped += 1;
                    first_malformed.get_or_insert(error);
                }
            },
        }
    }
    if skipped > 0 {
        warn!(skipped, "malformed rows skipped");
    }

    let before = records.len();
    records.retain(|record| keep_record(options.status_filter, record));
    let filtered_out = before - records.len();

    info!(
        input_rows,
        records = records.len(),
        skipped,
        filtered_out,
        status_filter = ?options.status_filter,
        "derivation complete"
    );
    Ok(Derived {
        records,
        input_rows,
        skipped,
        first_malformed,
        filtered_out,
    })
}
