//! Row-wise percentage columns.

use crate::error::Result;
use crate::table::{Table, Value};

/// Prefix of the columns added by [`percentage_of`].
pub const PERCENT_PREFIX: &str = "perc_";

/// Add a `perc_<column>` column for each numerator.
///
/// The denominator is the row-wise sum of `denominators`, not a separately
/// tracked total: dropping a category column renormalizes over the rest.
/// Missing cells count as zero. A zero denominator yields a missing
/// percentage.
pub fn percentage_of(table: &Table, numerators: &[&str], denominators: &[&str]) -> Result<Table> {
    let numerator_idx = numerators
        .iter()
        .map(|name| table.column_index(name))
        .collect::<Result<Vec<_>>>()?;
    let denominator_idx = denominators
        .iter()
        .map(|name| table.column_index(name))
        .collect::<Result<Vec<_>>>()?;

    let totals: Vec<f64> = table
        .rows()
        .iter()
        .map(|row| {
            denominator_idx
                .iter()
                .filter_map(|&idx| row[idx].as_f64())
                .sum()
        })
        .collect();

    let mut out = table.clone();
    for (name, &idx) in numerators.iter().zip(&numerator_idx) {
        let values = table
            .rows()
            .iter()
            .zip(&totals)
            .map(|(row, &total)| {
                if total == 0.0 {
                    Value::Missing
                } else {
                    Value::Number(row[idx].as_f64().unwrap_or(0.0) / total)
                }
            })
            .collect();
        out.add_column(format!("{PERCENT_PREFIX}{name}"), values)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_sum_to_one_over_the_denominator_set() {
        let mut table = Table::new(["title", "Male", "Female"]);
        table.push_row(vec!["Clerk".into(), 2.0.into(), 3.0.into()]).unwrap();
        let out = percentage_of(&table, &["Male", "Female"], &["Male", "Female"]).unwrap();
        let row = out.row(0).unwrap();
        assert_eq!(row.number("perc_Male"), Some(0.4));
        assert_eq!(row.number("perc_Female"), Some(0.6));
    }

    #[test]
    fn zero_denominator_is_missing() {
        let mut table = Table::new(["a", "b"]);
        table.push_row(vec![0.0.into(), 0.0.into()]).unwrap();
        let out = percentage_of(&table, &["a"], &["a", "b"]).unwrap();
        assert!(out.row(0).unwrap().get("perc_a").unwrap().is_missing());
    }
}
