//! Hash joins between report tables.

use std::collections::HashMap;

use crate::error::{CoreError, Result};
use crate::table::{Table, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
}

/// Join `left` and `right` on equal `keys`.
///
/// The index is built on `right` and looked up in `left` row order, so output
/// rows follow the left table. A left row matching several right rows is
/// repeated once per match. Under [`JoinKind::Left`] unmatched rows get
/// missing right-hand cells. Non-key columns present on both sides are an
/// error.
pub fn hash_join(left: &Table, right: &Table, keys: &[&str], kind: JoinKind) -> Result<Table> {
    let left_keys = keys
        .iter()
        .map(|name| left.column_index(name))
        .collect::<Result<Vec<_>>>()?;
    let right_keys = keys
        .iter()
        .map(|name| right.column_index(name))
        .collect::<Result<Vec<_>>>()?;
    let right_payload: Vec<usize> = (0..right.width())
        .filter(|idx| !right_keys.contains(idx))
        .collect();
    for &idx in &right_payload {
        let name = &right.columns()[idx];
        if left.has_column(name) {
            return Err(CoreError::DuplicateColumn(name.clone()));
        }
    }

    let mut index: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
    for (row_idx, row) in right.rows().iter().enumerate() {
        let key = right_keys.iter().map(|&idx| row[idx].key()).collect();
        index.entry(key).or_default().push(row_idx);
    }

    let columns = left
        .columns()
        .iter()
        .cloned()
        .chain(right_payload.iter().map(|&idx| right.columns()[idx].clone()));
    let mut out = Table::new(columns);
    for row in left.rows() {
        let key: Vec<String> = left_keys.iter().map(|&idx| row[idx].key()).collect();
        match index.get(&key) {
            Some(matches) => {
                for &match_idx in matches {
                    let other = &right.rows()[match_idx];
                    let joined = row
                        .iter()
                        .cloned()
                        .chain(right_payload.iter().map(|&idx| other[idx].clone()))
                        .collect();
                    out.push_row(joined)?;
                }
            }
            None if kind == JoinKind::Left => {
                let joined = row
                    .iter()
                    .cloned()
                    .chain(right_payload.iter().map(|_| Value::Missing))
                    .collect();
                out.push_row(joined)?;
            }
            None => {}
        }
    }
    Ok(out)
}
