//! Uniform-title reference list.

use std::collections::BTreeSet;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

const CODE_HEADERS: [&str; 2] = ["civil_service_title_code", "title_code"];
const FLAG_HEADER: &str = "uniform";

/// Loads the set of uniformed title codes from a reference CSV.
///
/// The file must have a title-code column. When a `uniform` column is
/// present only rows flagged yes/y/true/1 are taken; otherwise every listed
/// code is uniformed.
pub fn load_uniform_titles(path: &Path) -> Result<BTreeSet<String>> {
    let read_err = |source| IngestError::ReferenceRead {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_err)?;
    let headers = reader.headers().map_err(read_err)?.clone();
    let position = |wanted: &str| {
        headers
            .iter()
            .position(|header| header.trim_matches('\u{feff}').eq_ignore_ascii_case(wanted))
    };
    let code_idx = CODE_HEADERS
        .iter()
        .find_map(|name| position(*name))
        .ok_or_else(|| IngestError::MissingColumn {
            column: CODE_HEADERS[0].to_string(),
            path: path.to_path_buf(),
        })?;
    let flag_idx = position(FLAG_HEADER);

    let mut codes = BTreeSet::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        let Some(code) = record.get(code_idx).filter(|code| !code.is_empty()) else {
            continue;
        };
        let flagged = match flag_idx {
            Some(idx) => is_yes(record.get(idx).unwrap_or("")),
            None => true,
        };
        if flagged {
            codes.insert(code.to_string());
        }
    }
    debug!(path = %path.display(), codes = codes.len(), "uniform titles loaded");
    Ok(codes)
}

fn is_yes(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn flagged_rows_only() {
        let file = create_temp_csv("title_code,uniform\n70210,yes\n10251,no\n70235,Y\n");
        let codes = load_uniform_titles(file.path()).unwrap();
        assert_eq!(
            codes.into_iter().collect::<Vec<_>>(),
            vec!["70210".to_string(), "70235".to_string()]
        );
    }

    #[test]
    fn all_rows_without_flag_column() {
        let file = create_temp_csv("civil_service_title_code\n70210\n\n91628\n");
        let codes = load_uniform_titles(file.path()).unwrap();
        assert_eq!(codes.len(), 2);
    }

    #[test]
    fn missing_code_column() {
        let file = create_temp_csv("name\nPolice Officer\n");
        let err = load_uniform_titles(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { .. }));
    }
}
