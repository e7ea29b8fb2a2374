//! Canonical column names for normalized payroll tables.

pub const FISCAL_YEAR: &str = "fiscal_year";
pub const PAYROLL_NUMBER: &str = "payroll_number";
pub const AGENCY_CODE: &str = "agency_code";
pub const AGENCY: &str = "agency";
pub const EMPLOYEE_ID: &str = "employee_id";
pub const START_DATE: &str = "start_date";
pub const DATE_OF_BIRTH: &str = "date_of_birth";
pub const TITLE_CODE: &str = "civil_service_title_code";
pub const TITLE_NAME: &str = "civil_service_title_name";
pub const TITLE_CLASSIFICATION: &str = "title_classification";
pub const EMPLOYEE_STATUS: &str = "employee_status";
pub const BASE_SALARY: &str = "base_salary";
pub const MIN_SALARY: &str = "min_salary";
pub const MAX_SALARY: &str = "max_salary";
pub const GENDER: &str = "gender";
pub const RACE: &str = "race";
pub const ETHNICITY: &str = "ethnicity";

/// Positional layout of the standard 25-column payroll extract.
pub const DEFAULT_COLUMNS: [&str; 25] = [
    FISCAL_YEAR,
    PAYROLL_NUMBER,
    AGENCY_CODE,
    AGENCY,
    EMPLOYEE_ID,
    "work_location_borough",
    START_DATE,
    DATE_OF_BIRTH,
    TITLE_CODE,
    TITLE_NAME,
    TITLE_CLASSIFICATION,
    "job_category",
    "career_level",
    EMPLOYEE_STATUS,
    "pay_basis",
    BASE_SALARY,
    MIN_SALARY,
    MAX_SALARY,
    "regular_hours",
    "regular_gross_paid",
    "ot_hours",
    "total_ot_paid",
    GENDER,
    RACE,
    ETHNICITY,
];

/// Columns the deriver cannot work without.
pub const REQUIRED_COLUMNS: [&str; 13] = [
    AGENCY,
    START_DATE,
    DATE_OF_BIRTH,
    TITLE_CODE,
    TITLE_NAME,
    TITLE_CLASSIFICATION,
    EMPLOYEE_STATUS,
    BASE_SALARY,
    MIN_SALARY,
    MAX_SALARY,
    GENDER,
    RACE,
    ETHNICITY,
];

/// Pass-through identifier columns, read when present.
pub const OPTIONAL_COLUMNS: [&str; 4] = [FISCAL_YEAR, PAYROLL_NUMBER, AGENCY_CODE, EMPLOYEE_ID];
