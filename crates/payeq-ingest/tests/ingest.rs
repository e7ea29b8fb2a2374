//! Integration tests for loading and normalizing payroll files.

use std::io::Write;

use payeq_ingest::{IngestError, normalize_columns, read_payroll_csv, string_values};
use payeq_model::{ColumnNames, SchemaError};
use tempfile::NamedTempFile;

const RAW_HEADER: &str = "Fiscal Year,Payroll Number,Agency Code,Agency Name,Employee ID,\
Work Location,Start Date,DOB,Title Code,Title Description,Classification,Job Category,\
Career Level,Status,Pay Basis,Base Salary,Min Salary,Max Salary,Regular Hours,\
Regular Gross Paid,OT Hours,Total OT Paid,Gender,Race,Ethnicity";

const RAW_ROW: &str = "2023,1,056,POLICE DEPARTMENT,E1,BROOKLYN,2015-07-01,1985-03-12,\
70210,POLICE OFFICER,Competitive,Public Safety,Entry,Full-Time,per Annum,85000,42500,92000,\
1820,85000,120,9000,Male,White,Not Hispanic or Latino";

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn default_layout_renames_raw_headers() {
    let file = create_temp_csv(&format!("{RAW_HEADER}\n{RAW_ROW}\n"));
    let raw = read_payroll_csv(file.path()).unwrap();
    let df = normalize_columns(raw, &ColumnNames::Default).unwrap();

    let agency = string_values(&df, "agency").unwrap();
    assert_eq!(agency, vec![Some("POLICE DEPARTMENT".to_string())]);
    let code = string_values(&df, "civil_service_title_code").unwrap();
    assert_eq!(code, vec![Some("70210".to_string())]);
}

#[test]
fn explicit_names_with_wrong_length_fail() {
    let file = create_temp_csv(&format!("{RAW_HEADER}\n{RAW_ROW}\n"));
    let raw = read_payroll_csv(file.path()).unwrap();
    let names = ColumnNames::Explicit(vec!["agency".to_string(); 3]);
    let err = normalize_columns(raw, &names).unwrap_err();
    assert!(matches!(
        err,
        IngestError::Schema(SchemaError::ColumnCountMismatch {
            expected: 3,
            actual: 25
        })
    ));
}

#[test]
fn leading_zeros_survive_text_ingestion() {
    let file = create_temp_csv(&format!("{RAW_HEADER}\n{RAW_ROW}\n"));
    let raw = read_payroll_csv(file.path()).unwrap();
    let df = normalize_columns(raw, &ColumnNames::Default).unwrap();
    let code = string_values(&df, "agency_code").unwrap();
    assert_eq!(code, vec![Some("056".to_string())]);
}
