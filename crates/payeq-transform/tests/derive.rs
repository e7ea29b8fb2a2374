//! Integration tests for the attribute deriver.

use std::collections::BTreeSet;

use payeq_model::schema::REQUIRED_COLUMNS;
use payeq_model::{
    ConfigError, DeriveOptions, ParsePolicy, RaceEth, SchemaError, StatusFilter,
};
use payeq_transform::{TransformError, derive, records_to_frame};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

/// One input row as (column, value) pairs; unspecified columns get defaults.
fn row(overrides: &[(&str, &str)]) -> Vec<(String, String)> {
    let defaults = [
        ("agency", "DEPT OF FINANCE"),
        ("start_date", "2013-01-01"),
        ("date_of_birth", "1980-06-15"),
        ("civil_service_title_code", "10251"),
        ("civil_service_title_name", "CLERICAL ASSOCIATE"),
        ("title_classification", "Competitive"),
        ("employee_status", "Full-Time"),
        ("base_salary", "45000"),
        ("min_salary", "35000"),
        ("max_salary", "55000"),
        ("gender", "Female"),
        ("race", "Black or African American"),
        ("ethnicity", "Not Hispanic or Latino"),
    ];
    defaults
        .iter()
        .map(|(name, value)| {
            let value = overrides
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, v)| *v)
                .unwrap_or(*value);
            (name.to_string(), value.to_string())
        })
        .collect()
}

fn frame(rows: &[Vec<(String, String)>]) -> DataFrame {
    let cols: Vec<Column> = REQUIRED_COLUMNS
        .iter()
        .map(|name| {
            let values: Vec<String> = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .find(|(key, _)| key.as_str() == *name)
                        .map(|(_, value)| value.clone())
                        .unwrap_or_default()
                })
                .collect();
            Series::new((*name).into(), values).into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

#[test]
fn missing_reference_year_is_a_config_error() {
    let df = frame(&[row(&[])]);
    let err = derive(&df, &DeriveOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        TransformError::Config(ConfigError::MissingReferenceYear)
    ));
}

#[test]
fn derives_tenure_age_and_demographics() {
    let df = frame(&[row(&[])]);
    let derived = derive(&df, &DeriveOptions::new(2023)).unwrap();
    assert_eq!(derived.records.len(), 1);
    let record = &derived.records[0];
    assert_eq!(record.days_from_start, 4016);
    assert_eq!(record.years_from_start, 11);
    assert_eq!(record.age_years, 43);
    assert_eq!(record.race_eth, RaceEth::NhBlack);
    assert!(record.nonwhite);
    assert!(record.nonwhite_female);
    assert_eq!(record.uniform, None);
}

#[test]
fn malformed_date_fails_batch_by_default() {
    let df = frame(&[row(&[]), row(&[("start_date", "not a date")])]);
    let err = derive(&df, &DeriveOptions::new(2023)).unwrap_err();
    match err {
        TransformError::Parse(parse) => {
            assert_eq!(parse.row, 2);
            assert_eq!(parse.column, "start_date");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_rows_can_be_skipped() {
    let df = frame(&[
        row(&[]),
        row(&[("base_salary", "lots")]),
        row(&[("min_salary", "??")]),
    ]);
    let options = DeriveOptions::new(2023).with_parse_policy(ParsePolicy::SkipMalformed);
    let derived = derive(&df, &options).unwrap();
    assert_eq!(derived.records.len(), 1);
    assert_eq!(derived.skipped, 2);
    assert_eq!(derived.input_rows, 3);

    let first = derived.first_malformed.unwrap();
    assert_eq!(first.row, 2);
    assert_eq!(first.column, "base_salary");
    assert_eq!(first.value, "lots");
}

#[test]
fn full_time_profile() {
    let df = frame(&[
        row(&[]),
        row(&[("employee_status", "Part-Time")]),
        row(&[("base_salary", "14999")]),
        row(&[("date_of_birth", "2010-01-01")]),
        row(&[("title_classification", "Exempt")]),
        row(&[("title_classification", "Non-Competitive")]),
    ]);
    let options = DeriveOptions::new(2023).with_status_filter(StatusFilter::FullTime);
    let derived = derive(&df, &options).unwrap();
    assert_eq!(derived.records.len(), 2);
    assert_eq!(derived.filtered_out, 4);
}

#[test]
fn part_time_profile() {
    let df = frame(&[
        row(&[("employee_status", "Part-Time"), ("base_salary", "13")]),
        row(&[("employee_status", "Part-Time"), ("base_salary", "12.5")]),
        row(&[
            ("employee_status", "Part-Time"),
            ("date_of_birth", "2015-01-01"),
        ]),
        row(&[]),
    ]);
    let options = DeriveOptions::new(2023).with_status_filter(StatusFilter::PartTime);
    let derived = derive(&df, &options).unwrap();
    // The age-8 part-timer passes the age >= 1 floor.
    assert_eq!(derived.records.len(), 2);
}

#[test]
fn unknown_filter_value_passes_everything() {
    let df = frame(&[row(&[]), row(&[("employee_status", "Per Diem")])]);
    let options = DeriveOptions::new(2023).with_status_filter(StatusFilter::parse("seasonal"));
    let derived = derive(&df, &options).unwrap();
    assert_eq!(derived.records.len(), 2);
    assert_eq!(derived.filtered_out, 0);
}

#[test]
fn low_salary_floor_is_suppressed_for_full_time() {
    let df = frame(&[row(&[("min_salary", "12000"), ("max_salary", "20000")])]);
    let derived = derive(&df, &DeriveOptions::new(2023)).unwrap();
    assert_eq!(derived.records[0].min_salary, None);
    assert_eq!(derived.records[0].max_salary, None);
}

#[test]
fn uniform_titles_tag_every_record() {
    let df = frame(&[
        row(&[("civil_service_title_code", "70210")]),
        row(&[]),
    ]);
    let titles: BTreeSet<String> = ["70210".to_string()].into_iter().collect();
    let options = DeriveOptions::new(2023).with_uniform_titles(titles);
    let derived = derive(&df, &options).unwrap();
    assert_eq!(derived.records[0].uniform, Some(true));
    assert_eq!(derived.records[1].uniform, Some(false));
}

#[test]
fn missing_required_column_is_a_schema_error() {
    let df = frame(&[row(&[])]).drop("race").unwrap();
    let err = derive(&df, &DeriveOptions::new(2023)).unwrap_err();
    assert!(matches!(
        err,
        TransformError::Schema(SchemaError::MissingColumn(ref name)) if name == "race"
    ));
}

#[test]
fn records_render_to_frame() {
    let df = frame(&[row(&[]), row(&[("gender", "Male")])]);
    let derived = derive(&df, &DeriveOptions::new(2023)).unwrap();
    let out = records_to_frame(&derived.records).unwrap();
    assert_eq!(out.height(), 2);
    assert!(out.column("race_eth").is_ok());
    assert!(out.column("nonwhite_female").is_ok());
}
