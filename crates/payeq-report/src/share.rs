//! Per-title share of a categorical value, optionally binned.

use std::collections::BTreeMap;

use payeq_core::{Binning, CoreError, Table, Value, group_records, median};
use payeq_model::{EmployeeRecord, Field};
use tracing::{debug, debug_span, info};

use crate::common::{DECIMALS, record_table};
use crate::error::Result;

/// Width of share bins over `[0, 1]`.
pub const SHARE_BIN_WIDTH: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOptions {
    /// Categorical field compared against `value`.
    pub variable: Field,
    pub value: String,
    pub binning: bool,
}

impl ShareOptions {
    pub fn new(variable: Field, value: impl Into<String>) -> Self {
        Self {
            variable,
            value: value.into(),
            binning: true,
        }
    }

    #[must_use]
    pub fn with_binning(mut self, binning: bool) -> Self {
        self.binning = binning;
        self
    }
}

struct TitleShare<'a> {
    share: f64,
    records: &'a [&'a EmployeeRecord],
}

/// Share of each title's workers whose `variable` equals `value`.
///
/// A title with no matching worker has share `0`. With binning, titles are
/// bucketed by share into intervals of [`SHARE_BIN_WIDTH`] and each occupied
/// bucket reports the median salary and headcount over all its titles'
/// workers (`share_bin`, `median_salary`, `worker_count`, `title_count`).
/// Without binning every record is returned with its title's `share`
/// appended.
///
/// # Errors
///
/// [`CoreError::InvalidAggregation`] when `variable` is numeric.
pub fn share_by_variable(records: &[EmployeeRecord], options: &ShareOptions) -> Result<Table> {
    let span = debug_span!(
        "share_by_variable",
        records = records.len(),
        variable = %options.variable,
        binning = options.binning
    );
    let _guard = span.enter();

    if options.variable.is_numeric() {
        return Err(CoreError::InvalidAggregation {
            field: options.variable,
            reason: "share variable must be categorical",
        }
        .into());
    }

    let groups = group_records(records, &[Field::TitleCode])?;
    let shares: BTreeMap<&str, TitleShare<'_>> = groups
        .iter()
        .map(|(key, group)| {
            let matching = group
                .iter()
                .filter(|record| {
                    options
                        .variable
                        .text(record)
                        .is_some_and(|text| text == options.value.as_str())
                })
                .count();
            let share = TitleShare {
                share: matching as f64 / group.len() as f64,
                records: group.as_slice(),
            };
            (key[0].as_str(), share)
        })
        .collect();
    debug!(titles = shares.len(), "title shares computed");

    let mut table = if options.binning {
        binned(&shares)?
    } else {
        unbinned(records, &shares)?
    };
    table.round(DECIMALS);
    info!(rows = table.height(), "share report ready");
    Ok(table)
}

fn binned(shares: &BTreeMap<&str, TitleShare<'_>>) -> Result<Table> {
    let binning = Binning::unit(SHARE_BIN_WIDTH)?;
    let mut buckets: BTreeMap<usize, (Vec<f64>, usize)> = BTreeMap::new();
    for title in shares.values() {
        let Some(bin) = binning.assign(title.share) else {
            continue;
        };
        let (salaries, titles) = buckets.entry(bin.index).or_default();
        salaries.extend(title.records.iter().map(|record| record.base_salary));
        *titles += 1;
    }

    let mut table = Table::new(["share_bin", "median_salary", "worker_count", "title_count"]);
    for (index, (salaries, titles)) in buckets {
        let label = binning
            .bin_at(index)
            .map_or(Value::Missing, |bin| Value::text(bin.label()));
        let workers = salaries.len() as f64;
        table.push_row(vec![
            label,
            Value::from(median(salaries)),
            Value::Number(workers),
            Value::Number(titles as f64),
        ])?;
    }
    Ok(table)
}

fn unbinned(
    records: &[EmployeeRecord],
    shares: &BTreeMap<&str, TitleShare<'_>>,
) -> Result<Table> {
    let mut table = record_table(records)?;
    let values = records
        .iter()
        .map(|record| {
            shares
                .get(record.title_code.as_str())
                .map_or(Value::Missing, |title| Value::Number(title.share))
        })
        .collect();
    table.add_column("share", values)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;

    #[test]
    fn numeric_variable_is_rejected() {
        let options = ShareOptions::new(Field::BaseSalary, "50000");
        let err = share_by_variable(&[], &options).unwrap_err();
        assert!(matches!(
            err,
            ReportError::Core(CoreError::InvalidAggregation {
                field: Field::BaseSalary,
                ..
            })
        ));
    }
}
