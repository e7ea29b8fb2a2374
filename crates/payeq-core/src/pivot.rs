//! Long-to-wide pivot.

use std::collections::{BTreeSet, HashMap};

use crate::error::{CoreError, Result};
use crate::table::{Table, Value};

/// Column name used for a missing pivot key.
pub const MISSING_KEY_LABEL: &str = "NA";

/// Spread `value_column` across one new column per distinct value of
/// `key_column`.
///
/// Every other column identifies a row; output rows follow the first
/// appearance of each identity. `levels` always become columns, in the given
/// order, followed by any other observed key in sorted order. Combinations
/// absent from the input are filled with `0`.
pub fn pivot(
    table: &Table,
    key_column: &str,
    value_column: &str,
    levels: &[String],
) -> Result<Table> {
    let key_idx = table.column_index(key_column)?;
    let value_idx = table.column_index(value_column)?;
    let id_indices: Vec<usize> = (0..table.width())
        .filter(|idx| *idx != key_idx && *idx != value_idx)
        .collect();

    let key_name = |value: &Value| {
        let key = value.key();
        if key.is_empty() {
            MISSING_KEY_LABEL.to_string()
        } else {
            key
        }
    };

    let extra: BTreeSet<String> = table
        .rows()
        .iter()
        .map(|row| key_name(&row[key_idx]))
        .filter(|key| !levels.contains(key))
        .collect();
    let key_columns: Vec<String> = levels.iter().cloned().chain(extra).collect();
    let key_position: HashMap<&str, usize> = key_columns
        .iter()
        .enumerate()
        .map(|(idx, key)| (key.as_str(), idx))
        .collect();

    let mut identities: Vec<Vec<Value>> = Vec::new();
    let mut cells: Vec<Vec<Option<Value>>> = Vec::new();
    let mut identity_index: HashMap<Vec<String>, usize> = HashMap::new();
    for row in table.rows() {
        let identity: Vec<Value> = id_indices.iter().map(|&idx| row[idx].clone()).collect();
        let identity_key: Vec<String> = identity.iter().map(Value::key).collect();
        let slot = *identity_index.entry(identity_key).or_insert_with(|| {
            identities.push(identity);
            cells.push(vec![None; key_columns.len()]);
            identities.len() - 1
        });
        let key = key_name(&row[key_idx]);
        let column = key_position[key.as_str()];
        let cell = &mut cells[slot][column];
        if cell.is_some() {
            return Err(CoreError::DuplicatePivotKey {
                key_column: key_column.to_string(),
                key,
            });
        }
        *cell = Some(row[value_idx].clone());
    }

    let columns = id_indices
        .iter()
        .map(|&idx| table.columns()[idx].clone())
        .chain(key_columns.iter().cloned());
    let mut out = Table::new(columns);
    for (identity, row_cells) in identities.into_iter().zip(cells) {
        let row = identity
            .into_iter()
            .chain(
                row_cells
                    .into_iter()
                    .map(|cell| cell.unwrap_or(Value::Number(0.0))),
            )
            .collect();
        out.push_row(row)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long() -> Table {
        let mut table = Table::new(["title", "gender", "count"]);
        table.push_row(vec!["Clerk".into(), "Female".into(), 3.0.into()]).unwrap();
        table.push_row(vec!["Clerk".into(), "Male".into(), 2.0.into()]).unwrap();
        table.push_row(vec!["Analyst".into(), "Female".into(), 4.0.into()]).unwrap();
        table.push_row(vec!["Analyst".into(), "X".into(), 1.0.into()]).unwrap();
        table
    }

    #[test]
    fn missing_combinations_fill_with_zero() {
        let levels = vec!["Male".to_string(), "Female".to_string()];
        let wide = pivot(&long(), "gender", "count", &levels).unwrap();
        assert_eq!(wide.columns(), ["title", "Male", "Female", "X"]);
        let analyst = wide.row(1).unwrap();
        assert_eq!(analyst.text("title"), Some("Analyst"));
        assert_eq!(analyst.number("Male"), Some(0.0));
        assert_eq!(analyst.number("Female"), Some(4.0));
        let clerk = wide.row(0).unwrap();
        assert_eq!(clerk.number("X"), Some(0.0));
    }

    #[test]
    fn levels_become_columns_even_when_unobserved() {
        let levels = vec!["Other".to_string()];
        let wide = pivot(&long(), "gender", "count", &levels).unwrap();
        assert_eq!(wide.columns(), ["title", "Other", "Female", "Male", "X"]);
        assert!(wide.iter_rows().all(|row| row.number("Other") == Some(0.0)));
    }

    #[test]
    fn duplicate_key_is_an_error() {
        let mut table = long();
        table.push_row(vec!["Clerk".into(), "Male".into(), 9.0.into()]).unwrap();
        let err = pivot(&table, "gender", "count", &[]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicatePivotKey { .. }));
    }
}
