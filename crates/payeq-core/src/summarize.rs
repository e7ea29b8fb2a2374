//! Grouped summaries over enriched records.

use std::collections::BTreeMap;

use payeq_model::{EmployeeRecord, Field};
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::table::{Table, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggOp {
    Count,
    Median,
    Mean,
}

/// Aggregations applied per group, in output column order.
pub type AggregationSpec = Vec<Aggregation>;

/// One output column of a grouped summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub op: AggOp,
    /// Source field; unused for [`AggOp::Count`].
    pub field: Option<Field>,
    pub alias: String,
}

impl Aggregation {
    pub fn count(alias: impl Into<String>) -> Self {
        Self {
            op: AggOp::Count,
            field: None,
            alias: alias.into(),
        }
    }

    pub fn median(field: Field, alias: impl Into<String>) -> Self {
        Self {
            op: AggOp::Median,
            field: Some(field),
            alias: alias.into(),
        }
    }

    pub fn mean(field: Field, alias: impl Into<String>) -> Self {
        Self {
            op: AggOp::Mean,
            field: Some(field),
            alias: alias.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        match (self.op, self.field) {
            (AggOp::Count, _) => Ok(()),
            (_, Some(field)) if field.is_numeric() => Ok(()),
            (_, Some(field)) => Err(CoreError::InvalidAggregation {
                field,
                reason: "median and mean need a numeric field",
            }),
            (_, None) => Err(CoreError::MissingAggregationField(self.alias.clone())),
        }
    }

    fn apply(&self, group: &[&EmployeeRecord]) -> Value {
        let values: Vec<f64> = match (self.op, self.field) {
            (AggOp::Count, _) | (_, None) => Vec::new(),
            (_, Some(field)) => group
                .iter()
                .filter_map(|record| field.number(record))
                .collect(),
        };
        match self.op {
            AggOp::Count => Value::Number(group.len() as f64),
            AggOp::Median => median(values).into(),
            AggOp::Mean => mean(values).into(),
        }
    }
}

/// Median of the values, averaging the middle pair for even counts.
/// None for an empty input.
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut values: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Records partitioned by their key tuple.
pub type Groups<'a> = BTreeMap<Vec<String>, Vec<&'a EmployeeRecord>>;

/// Partition records by the text of `keys`, in key order. A missing value
/// (an untagged uniform flag) groups under the empty string.
pub fn group_records<'a>(
    records: impl IntoIterator<Item = &'a EmployeeRecord>,
    keys: &[Field],
) -> Result<Groups<'a>> {
    if let Some(&field) = keys.iter().find(|field| field.is_numeric()) {
        return Err(CoreError::InvalidAggregation {
            field,
            reason: "numeric fields cannot be group keys",
        });
    }
    let mut groups: Groups<'a> = BTreeMap::new();
    for record in records {
        let key = keys
            .iter()
            .map(|field| field.text(record).map(|v| v.into_owned()).unwrap_or_default())
            .collect();
        groups.entry(key).or_default().push(record);
    }
    Ok(groups)
}

/// Group records by `keys` and compute each aggregation per group.
///
/// The result has the key columns (named after the fields) followed by one
/// column per aggregation alias, one row per distinct key tuple in sorted
/// order. Median and mean ignore null values; a group with no values gets
/// a missing cell.
///
/// # Errors
///
/// [`CoreError::InvalidAggregation`] when a key is numeric or a median or
/// mean targets a categorical field; [`CoreError::DuplicateColumn`] when
/// output names collide. Both are checked before any record is read.
pub fn group_summarize<'a>(
    records: impl IntoIterator<Item = &'a EmployeeRecord>,
    keys: &[Field],
    aggregations: &[Aggregation],
) -> Result<Table> {
    for aggregation in aggregations {
        aggregation.validate()?;
    }
    let names: Vec<String> = keys
        .iter()
        .map(|field| field.name().to_string())
        .chain(aggregations.iter().map(|agg| agg.alias.clone()))
        .collect();
    for (idx, name) in names.iter().enumerate() {
        if names[..idx].contains(name) {
            return Err(CoreError::DuplicateColumn(name.clone()));
        }
    }

    let groups = group_records(records, keys)?;
    let mut table = Table::new(names);
    for (key, group) in &groups {
        let row = key
            .iter()
            .map(|value| Value::text(value.as_str()))
            .chain(aggregations.iter().map(|agg| agg.apply(group)))
            .collect();
        table.push_row(row)?;
    }
    debug!(
        records = groups.values().map(Vec::len).sum::<usize>(),
        groups = table.height(),
        "grouped summary"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_records() -> Vec<EmployeeRecord> {
        Vec::new()
    }

    #[test]
    fn median_handles_odd_and_even() {
        assert_eq!(median([3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median([4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(std::iter::empty()), None);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean([1.0, 2.0]), Some(1.5));
        assert_eq!(mean(Vec::new()), None);
    }

    #[test]
    fn categorical_median_is_rejected() {
        let err = group_summarize(
            &no_records(),
            &[Field::Agency],
            &[Aggregation::median(Field::Gender, "m")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidAggregation {
                field: Field::Gender,
                ..
            }
        ));
    }

    #[test]
    fn numeric_group_key_is_rejected() {
        let err = group_summarize(&no_records(), &[Field::BaseSalary], &[Aggregation::count("n")])
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidAggregation { .. }));
    }

    #[test]
    fn alias_collision_is_rejected() {
        let err = group_summarize(&no_records(), &[Field::Agency], &[Aggregation::count("agency")])
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateColumn(name) if name == "agency"));
    }
}
