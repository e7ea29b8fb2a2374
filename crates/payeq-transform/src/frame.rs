//! Rendering enriched records back into a Polars DataFrame.

use payeq_model::{EmployeeRecord, Field};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::Result;

/// Build a DataFrame with one row per record.
///
/// Identifier columns come first, then dates as ISO strings, then every
/// [`Field`] in schema order. Flags render as `1`/`0`.
pub fn records_to_frame(records: &[EmployeeRecord]) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::new();

    let text = |name: &str, values: Vec<Option<String>>| {
        Series::new(name.into(), values).into_column()
    };
    columns.push(text(
        "employee_id",
        records.iter().map(|r| r.employee_id.clone()).collect(),
    ));
    columns.push(text(
        "fiscal_year",
        records.iter().map(|r| r.fiscal_year.clone()).collect(),
    ));
    columns.push(text(
        "start_date",
        records
            .iter()
            .map(|r| Some(r.start_date.format("%Y-%m-%d").to_string()))
            .collect(),
    ));
    columns.push(text(
        "date_of_birth",
        records
            .iter()
            .map(|r| Some(r.date_of_birth.format("%Y-%m-%d").to_string()))
            .collect(),
    ));

    for field in Field::ALL {
        let column = match field {
            Field::Nonwhite => flag_column(field, records.iter().map(|r| r.nonwhite)),
            Field::NonwhiteFemale => flag_column(field, records.iter().map(|r| r.nonwhite_female)),
            _ if field.is_numeric() => {
                let values: Vec<Option<f64>> = records.iter().map(|r| field.number(r)).collect();
                Series::new(field.name().into(), values).into_column()
            }
            _ => {
                let values: Vec<Option<String>> = records
                    .iter()
                    .map(|r| field.text(r).map(|value| value.into_owned()))
                    .collect();
                Series::new(field.name().into(), values).into_column()
            }
        };
        columns.push(column);
    }

    Ok(DataFrame::new(columns)?)
}

fn flag_column(field: Field, values: impl Iterator<Item = bool>) -> Column {
    let values: Vec<i32> = values.map(i32::from).collect();
    Series::new(field.name().into(), values).into_column()
}
