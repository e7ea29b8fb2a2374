//! Top-N selection within groups.

use std::collections::HashMap;

use crate::error::Result;
use crate::table::{SortOrder, Table};

/// Keep the first `n` rows of each group after ordering by `rank_by`
/// descending.
///
/// The sort is stable, so rows with equal rank values keep their input
/// order; there is no secondary key. Groups appear in the order of their
/// first row after ranking.
pub fn top_n_per_group(
    table: &Table,
    group_columns: &[&str],
    rank_by: &str,
    n: usize,
) -> Result<Table> {
    let group_idx = group_columns
        .iter()
        .map(|name| table.column_index(name))
        .collect::<Result<Vec<_>>>()?;
    let ranked = table.sort_by(rank_by, SortOrder::Descending)?;

    let mut taken: HashMap<Vec<String>, usize> = HashMap::new();
    let mut out = Table::new(ranked.columns().iter().cloned());
    for row in ranked.rows() {
        let key: Vec<String> = group_idx.iter().map(|&idx| row[idx].key()).collect();
        let count = taken.entry(key).or_insert(0);
        if *count < n {
            *count += 1;
            out.push_row(row.clone())?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    #[test]
    fn keeps_highest_per_group() {
        let mut table = Table::new(["agency", "title", "workers"]);
        for (agency, title, workers) in [
            ("A", "t1", 3.0),
            ("A", "t2", 10.0),
            ("B", "t3", 1.0),
            ("A", "t4", 7.0),
        ] {
            table
                .push_row(vec![agency.into(), title.into(), Value::Number(workers)])
                .unwrap();
        }
        let top = top_n_per_group(&table, &["agency"], "workers", 2).unwrap();
        let titles: Vec<_> = top.iter_rows().map(|r| r.text("title").unwrap()).collect();
        assert_eq!(titles, ["t2", "t4", "t3"]);
    }

    #[test]
    fn zero_keeps_nothing() {
        let mut table = Table::new(["g", "v"]);
        table.push_row(vec!["a".into(), 1.0.into()]).unwrap();
        assert!(top_n_per_group(&table, &["g"], "v", 0).unwrap().is_empty());
    }
}
