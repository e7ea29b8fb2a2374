//! Integration tests for the CLI pipeline: config, load, report, export.

use std::fs;
use std::path::Path;

use payeq_cli::config::AnalysisConfig;
use payeq_cli::export::{sibling_path, write_records_csv, write_table_csv};
use payeq_cli::pipeline::{RunSummary, load_records};
use payeq_cli::summary::{render_report, render_run_summary};
use payeq_core::{Table, Value};
use payeq_report::{GenderOptions, RaceEthOptions, gender_composition, race_eth_composition};
use tempfile::TempDir;

const HEADER: &str = "agency,start_date,date_of_birth,civil_service_title_code,\
civil_service_title_name,title_classification,employee_status,base_salary,\
min_salary,max_salary,gender,race,ethnicity";

fn payroll_row(title: &str, code: &str, status: &str, salary: u32, gender: &str) -> String {
    format!(
        "DEPT OF FINANCE,2013-01-01,1980-06-15,{code},{title},Competitive,{status},\
         {salary},20000,90000,{gender},White,Not Hispanic or Latino"
    )
}

fn write_payroll(dir: &Path, rows: &[String]) -> std::path::PathBuf {
    let path = dir.join("payroll.csv");
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

fn clerk_payroll() -> Vec<String> {
    vec![
        payroll_row("CLERK", "10251", "Full-Time", 40000, "Male"),
        payroll_row("CLERK", "10251", "Full-Time", 42000, "Female"),
        payroll_row("CLERK", "10251", "Full-Time", 44000, "Female"),
        payroll_row("CLERK", "10251", "Full-Time", 46000, "Male"),
        payroll_row("CLERK", "10251", "Full-Time", 48000, "Female"),
        payroll_row("CLERK", "10251", "Part-Time", 30000, "Female"),
    ]
}

#[test]
fn config_file_is_overridden_by_flags() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("payeq.toml");
    fs::write(
        &config_path,
        "reference_year = 2022\nstatus_filter = \"full-time\"\nuniform_titles = \"titles.csv\"\n",
    )
    .unwrap();

    let loaded = AnalysisConfig::load(&config_path).unwrap();
    assert_eq!(loaded.reference_year, Some(2022));
    assert_eq!(loaded.uniform_titles, Some(dir.path().join("titles.csv")));

    let merged = loaded.with_overrides(AnalysisConfig {
        reference_year: Some(2023),
        ..AnalysisConfig::default()
    });
    assert_eq!(merged.reference_year, Some(2023));
    assert_eq!(merged.status_filter.as_deref(), Some("full-time"));
}

#[test]
fn unknown_config_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("payeq.toml");
    fs::write(&config_path, "reference_yr = 2023\n").unwrap();
    assert!(AnalysisConfig::load(&config_path).is_err());
}

#[test]
fn gender_report_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = write_payroll(dir.path(), &clerk_payroll());
    let config = AnalysisConfig {
        reference_year: Some(2023),
        status_filter: Some("full-time".to_string()),
        ..AnalysisConfig::default()
    };

    let derived = load_records(&input, &config).unwrap();
    assert_eq!(derived.input_rows, 6);
    assert_eq!(derived.filtered_out, 1);
    assert_eq!(derived.records.len(), 5);

    let report = gender_composition(&derived.records, &GenderOptions::new("DEPT OF FINANCE"))
        .unwrap();
    assert_eq!(report.height(), 1);
    let row = report.row(0).unwrap();
    assert_eq!(row.number("median_salary"), Some(44000.0));
    assert_eq!(row.number("perc_Female"), Some(0.6));

    let output = dir.path().join("gender.csv");
    write_table_csv(&report, &output).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    let mut lines = written.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("title_name,title_code"));
    assert!(header.contains("perc_Female"));
    assert!(lines.next().unwrap().starts_with("CLERK,10251"));
    assert_eq!(lines.next(), None);

    let summary = RunSummary::from_derived(&derived, report.height());
    insta::assert_snapshot!(render_run_summary(&summary), @r"
    input rows:   6
    skipped rows: 0
    filtered out: 1
    report rows:  1
    ");
}

#[test]
fn malformed_rows_fail_unless_skipped() {
    let dir = TempDir::new().unwrap();
    let mut rows = clerk_payroll();
    let malformed = payroll_row("CLERK", "10251", "Full-Time", 40000, "Male");
    rows.push(malformed.replace("2013-01-01", "soon"));
    let input = write_payroll(dir.path(), &rows);
    let mut config = AnalysisConfig {
        reference_year: Some(2023),
        ..AnalysisConfig::default()
    };

    assert!(load_records(&input, &config).is_err());

    config.skip_malformed = true;
    let derived = load_records(&input, &config).unwrap();
    assert_eq!(derived.skipped, 1);
    assert_eq!(derived.records.len(), 6);
    let first = derived.first_malformed.unwrap();
    assert_eq!(first.row, 7);
    assert_eq!(first.column, "start_date");
    assert_eq!(first.value, "soon");
}

#[test]
fn enriched_records_export_with_derived_columns() {
    let dir = TempDir::new().unwrap();
    let input = write_payroll(dir.path(), &clerk_payroll());
    let config = AnalysisConfig {
        reference_year: Some(2023),
        status_filter: Some("full-time".to_string()),
        ..AnalysisConfig::default()
    };
    let derived = load_records(&input, &config).unwrap();

    let output = dir.path().join("records.csv");
    write_records_csv(&derived.records, &output).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    let mut lines = written.lines();
    let header: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert!(header.contains(&"race_eth"));
    assert!(header.contains(&"nonwhite"));
    assert!(header.contains(&"years_from_start"));
    assert_eq!(lines.count(), 5);

    let nonwhite = header.iter().position(|name| *name == "nonwhite").unwrap();
    for line in written.lines().skip(1) {
        assert_eq!(line.split(',').nth(nonwhite), Some("0"));
    }
}

#[test]
fn missing_reference_year_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = write_payroll(dir.path(), &clerk_payroll());
    let error = load_records(&input, &AnalysisConfig::default()).unwrap_err();
    assert!(format!("{error:#}").contains("derive attributes"));
}

#[test]
fn race_eth_tables_export_to_sibling_files() {
    let dir = TempDir::new().unwrap();
    let input = write_payroll(dir.path(), &clerk_payroll());
    let config = AnalysisConfig {
        reference_year: Some(2023),
        ..AnalysisConfig::default()
    };
    let derived = load_records(&input, &config).unwrap();
    let report = race_eth_composition(&derived.records, &RaceEthOptions::new()).unwrap();

    let output = dir.path().join("race.csv");
    write_table_csv(&report.ranked, &output).unwrap();
    let nonwhite = sibling_path(&output, "nonwhite");
    write_table_csv(&report.nonwhite, &nonwhite).unwrap();

    assert!(output.exists());
    let written = fs::read_to_string(dir.path().join("race.nonwhite.csv")).unwrap();
    assert!(written.lines().next().unwrap().contains("perc_white"));
}

#[test]
fn render_report_shows_values_and_missing_cells() {
    let mut table = Table::new(["title", "median"]);
    table
        .push_row(vec![Value::from("CLERK"), Value::Number(44000.0)])
        .unwrap();
    table
        .push_row(vec![Value::from("ANALYST"), Value::Missing])
        .unwrap();

    let mut rendered = render_report(&table);
    rendered.force_no_tty();
    let text = rendered.to_string();
    assert!(text.contains("CLERK"));
    assert!(text.contains("44000"));
    assert!(text.contains(" - "));
    assert!(text.contains("median"));
}
