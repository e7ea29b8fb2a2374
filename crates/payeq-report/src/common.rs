//! Pieces shared by several reports.

use payeq_core::{Aggregation, Table, Value, group_summarize};
use payeq_model::{EmployeeRecord, Field};

use crate::error::Result;

/// Decimal places of every numeric report cell.
pub const DECIMALS: u32 = 2;

/// Smallest title headcount that is reported.
pub const MIN_TITLE_COUNT: f64 = 5.0;

/// Exportable gender rows need strictly more than this many of each gender.
pub const EXPORT_MIN_CELL: f64 = 4.0;

pub(crate) const TITLE_KEYS: [&str; 2] = ["title_name", "title_code"];
pub(crate) const TITLE_FIELDS: [Field; 2] = [Field::TitleName, Field::TitleCode];

pub(crate) fn in_agency<'a>(
    records: &'a [EmployeeRecord],
    agency: Option<&str>,
) -> Vec<&'a EmployeeRecord> {
    records
        .iter()
        .filter(|record| agency.is_none_or(|agency| record.agency == agency))
        .collect()
}

/// Per-title headcount with median and mean base salary.
pub(crate) fn title_salary_summary(records: &[&EmployeeRecord]) -> Result<Table> {
    Ok(group_summarize(
        records.iter().copied(),
        &TITLE_FIELDS,
        &[
            Aggregation::median(Field::BaseSalary, "median_salary"),
            Aggregation::mean(Field::BaseSalary, "mean_salary"),
            Aggregation::count("total_count"),
        ],
    )?)
}

/// One row per record with every field as a column.
pub(crate) fn record_table<'a>(
    records: impl IntoIterator<Item = &'a EmployeeRecord>,
) -> Result<Table> {
    let mut table = Table::new(Field::ALL.iter().map(|field| field.name()));
    for record in records {
        let row = Field::ALL
            .iter()
            .map(|field| {
                if field.is_numeric() {
                    Value::from(field.number(record))
                } else {
                    field
                        .text(record)
                        .map_or(Value::Missing, |text| Value::text(text.into_owned()))
                }
            })
            .collect();
        table.push_row(row)?;
    }
    Ok(table)
}
