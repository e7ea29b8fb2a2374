//! Row-oriented report table.
//!
//! Grouped summaries are small (one row per group), so the engine builds
//! them row-wise and converts to a Polars [`DataFrame`] only at the edge.

use std::cmp::Ordering;
use std::fmt;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Missing,
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Rendering used for grouping and join keys. Missing renders empty.
    pub fn key(&self) -> String {
        match self {
            Value::Text(value) => value.clone(),
            Value::Number(value) => format_number(*value),
            Value::Missing => String::new(),
        }
    }

    /// Missing sorts after every present value.
    fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Missing, Value::Missing) => Ordering::Equal,
            (Value::Missing, _) => Ordering::Greater,
            (_, Value::Missing) => Ordering::Less,
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(value) => f.write_str(value),
            Value::Number(value) => f.write_str(&format_number(*value)),
            Value::Missing => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<Option<f64>> for Value {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Value::Missing, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Format a number without trailing fractional zeros.
pub fn format_number(value: f64) -> String {
    let s = format!("{value}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> RowRef<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Value::as_f64)
    }

    pub fn text(&self, column: &str) -> Option<&'a str> {
        self.get(column).and_then(Value::as_text)
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, idx: usize) -> Option<RowRef<'_>> {
        self.rows.get(idx).map(|values| RowRef {
            columns: &self.columns,
            values,
        })
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(|values| RowRef {
            columns: &self.columns,
            values,
        })
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(CoreError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| CoreError::UnknownColumn(name.to_string()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Append a column; `values` must have one entry per row.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(CoreError::DuplicateColumn(name));
        }
        if values.len() != self.rows.len() {
            return Err(CoreError::RowWidth {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        self.columns.push(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Replace every cell of `name` with `f` applied to it.
    pub fn map_column(&mut self, name: &str, mut f: impl FnMut(&Value) -> Value) -> Result<()> {
        let idx = self.column_index(name)?;
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        Ok(())
    }

    pub fn rename_column(&mut self, from: &str, to: impl Into<String>) -> Result<()> {
        let to = to.into();
        let idx = self.column_index(from)?;
        if from != to && self.has_column(&to) {
            return Err(CoreError::DuplicateColumn(to));
        }
        self.columns[idx] = to;
        Ok(())
    }

    /// Rows for which `predicate` holds, in their original order.
    pub fn filter(&self, mut predicate: impl FnMut(RowRef<'_>) -> bool) -> Table {
        let rows = self
            .rows
            .iter()
            .filter(|values| {
                predicate(RowRef {
                    columns: &self.columns,
                    values,
                })
            })
            .cloned()
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Project onto `names`, in that order.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let indices = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>>>()?;
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
            .collect();
        Ok(Table {
            columns: names.iter().map(|name| (*name).to_string()).collect(),
            rows,
        })
    }

    /// Stable sort on one column. Missing values sort last either way.
    pub fn sort_by(&self, column: &str, order: SortOrder) -> Result<Table> {
        let idx = self.column_index(column)?;
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            let (left, right) = (&a[idx], &b[idx]);
            match (left.is_missing(), right.is_missing(), order) {
                (false, false, SortOrder::Descending) => right.compare(left),
                _ => left.compare(right),
            }
        });
        Ok(Table {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Round every numeric cell to `decimals` places.
    pub fn round(&mut self, decimals: u32) {
        let factor = 10f64.powi(decimals as i32);
        for value in self.rows.iter_mut().flatten() {
            if let Value::Number(number) = value {
                *number = (*number * factor).round() / factor;
            }
        }
    }

    /// Convert to a Polars DataFrame.
    ///
    /// A column whose present values are all numbers becomes Float64; any
    /// other column becomes String. Missing cells become nulls.
    pub fn to_data_frame(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.columns.len());
        for (idx, name) in self.columns.iter().enumerate() {
            let cells = self.rows.iter().map(|row| &row[idx]);
            let numeric = self.rows.iter().any(|row| matches!(row[idx], Value::Number(_)))
                && self.rows.iter().all(|row| !matches!(row[idx], Value::Text(_)));
            let column = if numeric {
                let values: Vec<Option<f64>> = cells.map(Value::as_f64).collect();
                Series::new(name.as_str().into(), values).into_column()
            } else {
                let values: Vec<Option<String>> = cells
                    .map(|value| (!value.is_missing()).then(|| value.to_string()))
                    .collect();
                Series::new(name.as_str().into(), values).into_column()
            };
            columns.push(column);
        }
        Ok(DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["title", "count"]);
        table.push_row(vec!["B".into(), 2.0.into()]).unwrap();
        table.push_row(vec!["A".into(), Value::Missing]).unwrap();
        table.push_row(vec!["C".into(), 5.0.into()]).unwrap();
        table
    }

    #[test]
    fn numbers_format_without_trailing_zeros() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(22000.25), "22000.25");
    }

    #[test]
    fn push_row_checks_width() {
        let mut table = Table::new(["a", "b"]);
        let err = table.push_row(vec![Value::Missing]).unwrap_err();
        assert!(matches!(err, CoreError::RowWidth { expected: 2, actual: 1 }));
    }

    #[test]
    fn sort_puts_missing_last() {
        let table = sample();
        let asc = table.sort_by("count", SortOrder::Ascending).unwrap();
        let titles: Vec<_> = asc.iter_rows().map(|r| r.text("title").unwrap()).collect();
        assert_eq!(titles, ["B", "C", "A"]);
        let desc = table.sort_by("count", SortOrder::Descending).unwrap();
        let titles: Vec<_> = desc.iter_rows().map(|r| r.text("title").unwrap()).collect();
        assert_eq!(titles, ["C", "B", "A"]);
    }

    #[test]
    fn select_and_filter() {
        let table = sample();
        let picked = table.select(&["count", "title"]).unwrap();
        assert_eq!(picked.columns(), ["count", "title"]);
        let present = table.filter(|row| row.number("count").is_some());
        assert_eq!(present.height(), 2);
        assert!(matches!(
            table.select(&["missing"]),
            Err(CoreError::UnknownColumn(_))
        ));
    }

    #[test]
    fn map_column_rewrites_cells_in_place() {
        let mut table = sample();
        table
            .map_column("title", |value| match value.as_text() {
                Some("A") => Value::text("first"),
                _ => value.clone(),
            })
            .unwrap();
        let titles: Vec<_> = table.iter_rows().map(|r| r.text("title").unwrap()).collect();
        assert_eq!(titles, ["B", "first", "C"]);
        assert!(table.map_column("missing", Value::clone).is_err());
    }

    #[test]
    fn round_only_touches_numbers() {
        let mut table = Table::new(["x", "label"]);
        table.push_row(vec![0.123456.into(), "0.123456".into()]).unwrap();
        table.round(2);
        assert_eq!(table.rows()[0][0], Value::Number(0.12));
        assert_eq!(table.rows()[0][1], Value::text("0.123456"));
    }

    #[test]
    fn data_frame_types_follow_values() {
        let df = sample().to_data_frame().unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(
            df.column("count").unwrap().dtype(),
            &polars::prelude::DataType::Float64
        );
        assert_eq!(
            df.column("title").unwrap().dtype(),
            &polars::prelude::DataType::String
        );
        assert_eq!(df.column("count").unwrap().null_count(), 1);
    }
}
