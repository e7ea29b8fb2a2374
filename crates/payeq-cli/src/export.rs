//! CSV export of report tables.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use payeq_core::Table;
use payeq_model::EmployeeRecord;
use payeq_transform::records_to_frame;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

/// Write `table` to `path` as CSV with a header row.
pub fn write_table_csv(table: &Table, path: &Path) -> Result<()> {
    let mut df = table.to_data_frame().context("build export frame")?;
    write_frame_csv(&mut df, path)?;
    info!(path = %path.display(), rows = df.height(), "report written");
    Ok(())
}

/// Write the enriched records, one row per employee with every derived
/// attribute.
pub fn write_records_csv(records: &[EmployeeRecord], path: &Path) -> Result<()> {
    let mut df = records_to_frame(records).context("build records frame")?;
    write_frame_csv(&mut df, path)?;
    info!(path = %path.display(), rows = df.height(), "enriched records written");
    Ok(())
}

fn write_frame_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write {}", path.display()))
}

/// Sibling path for a secondary table: `out.csv` becomes `out.<name>.csv`.
pub fn sibling_path(path: &Path, name: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map_or_else(|| "csv".to_string(), |ext| ext.to_string_lossy().into_owned());
    path.with_file_name(format!("{stem}.{name}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_keeps_directory_and_extension() {
        let path = Path::new("/tmp/out/race.csv");
        assert_eq!(
            sibling_path(path, "nonwhite"),
            PathBuf::from("/tmp/out/race.nonwhite.csv")
        );
        assert_eq!(
            sibling_path(Path::new("report"), "composition"),
            PathBuf::from("report.composition.csv")
        );
    }
}
