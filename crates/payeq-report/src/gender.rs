//! Gender composition of an agency's titles.

use payeq_core::{
    Aggregation, JoinKind, SortOrder, Table, group_summarize, hash_join, percentage_of, pivot,
};
use payeq_model::{EmployeeRecord, Field};
use tracing::{debug_span, info};

use crate::common::{
    DECIMALS, EXPORT_MIN_CELL, MIN_TITLE_COUNT, TITLE_KEYS, in_agency, title_salary_summary,
};
use crate::error::Result;

const MALE: &str = "Male";
const FEMALE: &str = "Female";

/// Columns kept in exportable mode.
pub const EXPORT_COLUMNS: [&str; 6] = [
    "title_name",
    "title_code",
    "median_salary",
    "mean_salary",
    MALE,
    FEMALE,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenderOptions {
    pub agency: String,
    /// Restrict columns and suppress small cells for publication.
    pub exportable: bool,
}

impl GenderOptions {
    pub fn new(agency: impl Into<String>) -> Self {
        Self {
            agency: agency.into(),
            exportable: false,
        }
    }

    #[must_use]
    pub fn with_exportable(mut self, exportable: bool) -> Self {
        self.exportable = exportable;
        self
    }
}

/// Male/female headcount and salary per title within one agency.
///
/// Titles with fewer than five workers are dropped. `perc_Male` and
/// `perc_Female` divide by `Male + Female` only, so other gender columns
/// never enter the denominator. Rows are ordered by median salary,
/// highest first.
///
/// In exportable mode the percentages are computed first, then the table is
/// cut down to [`EXPORT_COLUMNS`] and rows with four or fewer men or women
/// are suppressed.
pub fn gender_composition(records: &[EmployeeRecord], options: &GenderOptions) -> Result<Table> {
    let span = debug_span!(
        "gender_composition",
        records = records.len(),
        agency = %options.agency
    );
    let _guard = span.enter();

    let records = in_agency(records, Some(options.agency.as_str()));
    let counts = group_summarize(
        records.iter().copied(),
        &[Field::TitleName, Field::TitleCode, Field::Gender],
        &[Aggregation::count("count")],
    )?;
    let levels = vec![MALE.to_string(), FEMALE.to_string()];
    let wide = pivot(&counts, Field::Gender.name(), "count", &levels)?;
    let wide = percentage_of(&wide, &[MALE, FEMALE], &[MALE, FEMALE])?;

    let summary = title_salary_summary(&records)?
        .filter(|row| row.number("total_count").unwrap_or(0.0) >= MIN_TITLE_COUNT);
    let mut table = hash_join(&summary, &wide, &TITLE_KEYS, JoinKind::Inner)?
        .sort_by("median_salary", SortOrder::Descending)?;

    if options.exportable {
        table = table.select(&EXPORT_COLUMNS)?.filter(|row| {
            row.number(MALE).unwrap_or(0.0) > EXPORT_MIN_CELL
                && row.number(FEMALE).unwrap_or(0.0) > EXPORT_MIN_CELL
        });
    }
    table.round(DECIMALS);
    info!(
        rows = table.height(),
        exportable = options.exportable,
        "gender composition ready"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_columns_keep_counts() {
        assert!(EXPORT_COLUMNS.contains(&MALE));
        assert!(EXPORT_COLUMNS.contains(&FEMALE));
        assert!(!EXPORT_COLUMNS.contains(&"perc_Male"));
    }

    #[test]
    fn unknown_agency_yields_empty_table() {
        let table = gender_composition(&[], &GenderOptions::new("NOWHERE")).unwrap();
        assert!(table.is_empty());
    }
}
