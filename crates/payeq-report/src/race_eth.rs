//! Race/ethnicity composition of titles, with salary ranking.

use std::fmt;
use std::str::FromStr;

use payeq_core::{
    Aggregation, JoinKind, SortOrder, Table, Value, group_summarize, hash_join, percentage_of,
    pivot,
};
use payeq_model::{EmployeeRecord, Field, RaceEth};
use serde::{Deserialize, Serialize};
use tracing::{debug_span, info};

use crate::common::{
    DECIMALS, MIN_TITLE_COUNT, TITLE_FIELDS, TITLE_KEYS, in_agency, title_salary_summary,
};
use crate::error::{ReportError, Result};

/// Titles ranked high/low must have a median salary above this.
pub const MIN_RANKED_MEDIAN: f64 = 10.0;

const NONWHITE_PREFIX: &str = "nonwhite_";
const RACE_ETH_PREFIX: &str = "race_eth_";

const WHITE: &str = "white";
const NONWHITE: &str = "nonwhite";

/// Layout of a composition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadFormat {
    /// One column per category with counts and percentages.
    #[default]
    Wide,
    /// One row per title and category with count and salary statistics.
    Long,
}

/// Direction of the salary ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighLow {
    High,
    Low,
}

impl FromStr for SpreadFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wide" => Ok(SpreadFormat::Wide),
            "long" => Ok(SpreadFormat::Long),
            other => Err(ReportError::InvalidArgument(format!(
                "spread format must be 'wide' or 'long', got '{other}'"
            ))),
        }
    }
}

impl FromStr for HighLow {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(HighLow::High),
            "low" => Ok(HighLow::Low),
            other => Err(ReportError::InvalidArgument(format!(
                "high_low must be 'high' or 'low', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SpreadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpreadFormat::Wide => "wide",
            SpreadFormat::Long => "long",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaceEthOptions {
    pub agency: Option<String>,
    pub high_low: Option<HighLow>,
    pub spread: SpreadFormat,
}

impl RaceEthOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = Some(agency.into());
        self
    }

    #[must_use]
    pub fn with_high_low(mut self, high_low: HighLow) -> Self {
        self.high_low = Some(high_low);
        self
    }

    #[must_use]
    pub fn with_spread(mut self, spread: SpreadFormat) -> Self {
        self.spread = spread;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaceEthReport {
    /// Ranked titles with their composition attached.
    pub ranked: Table,
    /// race_eth per title in the chosen spread format.
    pub composition: Table,
    /// White/nonwhite per title in the chosen spread format.
    pub nonwhite: Table,
}

/// Race/ethnicity composition per title, optionally within one agency.
///
/// Without `high_low`, titles with at least five workers are ranked by
/// median salary, highest first, and both the race_eth and the
/// white/nonwhite compositions are attached. With `high_low`, titles must
/// also have a median salary above [`MIN_RANKED_MEDIAN`]; they are ranked
/// ascending for `Low` or descending for `High` and only the race_eth
/// composition is attached.
///
/// In long format the attached compositions are one-to-many, so the ranked
/// table holds one row per title and category combination.
pub fn race_eth_composition(
    records: &[EmployeeRecord],
    options: &RaceEthOptions,
) -> Result<RaceEthReport> {
    let span = debug_span!(
        "race_eth_composition",
        records = records.len(),
        spread = %options.spread
    );
    let _guard = span.enter();

    let records = in_agency(records, options.agency.as_deref());
    let composition = composition_table(
        &records,
        Field::RaceEth,
        &RaceEth::level_labels(),
        options.spread,
    )?;
    let nonwhite_levels = vec![WHITE.to_string(), NONWHITE.to_string()];
    let nonwhite = composition_table(&records, Field::Nonwhite, &nonwhite_levels, options.spread)?;

    let summary = title_salary_summary(&records)?;
    let (ranked, attach_nonwhite) = match options.high_low {
        Some(direction) => {
            let order = match direction {
                HighLow::High => SortOrder::Descending,
                HighLow::Low => SortOrder::Ascending,
            };
            let eligible = summary.filter(|row| {
                row.number("total_count").unwrap_or(0.0) >= MIN_TITLE_COUNT
                    && row.number("median_salary").unwrap_or(0.0) > MIN_RANKED_MEDIAN
            });
            (eligible.sort_by("median_salary", order)?, false)
        }
        None => {
            let eligible =
                summary.filter(|row| row.number("total_count").unwrap_or(0.0) >= MIN_TITLE_COUNT);
            (eligible.sort_by("median_salary", SortOrder::Descending)?, true)
        }
    };

    let mut ranked = hash_join(
        &ranked,
        &attachable(&composition, options.spread, RACE_ETH_PREFIX)?,
        &TITLE_KEYS,
        JoinKind::Left,
    )?;
    if attach_nonwhite {
        ranked = hash_join(
            &ranked,
            &attachable(&nonwhite, options.spread, NONWHITE_PREFIX)?,
            &TITLE_KEYS,
            JoinKind::Left,
        )?;
    }

    let mut report = RaceEthReport {
        ranked,
        composition,
        nonwhite,
    };
    for table in [&mut report.ranked, &mut report.composition, &mut report.nonwhite] {
        table.round(DECIMALS);
    }
    info!(
        ranked_rows = report.ranked.height(),
        composition_rows = report.composition.height(),
        "race/ethnicity composition ready"
    );
    Ok(report)
}

/// Composition of `field` per title.
fn composition_table(
    records: &[&EmployeeRecord],
    field: Field,
    levels: &[String],
    spread: SpreadFormat,
) -> Result<Table> {
    let keys = [TITLE_FIELDS[0], TITLE_FIELDS[1], field];
    let aggregations = match spread {
        SpreadFormat::Wide => vec![Aggregation::count("count")],
        SpreadFormat::Long => vec![
            Aggregation::count("count"),
            Aggregation::median(Field::BaseSalary, "median_salary"),
            Aggregation::mean(Field::BaseSalary, "mean_salary"),
        ],
    };
    let mut counts = group_summarize(records.iter().copied(), &keys, &aggregations)?;
    if field == Field::Nonwhite {
        counts.map_column(field.name(), nonwhite_label)?;
    }
    match spread {
        SpreadFormat::Wide => {
            let wide = pivot(&counts, field.name(), "count", levels)?;
            let categories: Vec<&str> = wide
                .columns()
                .iter()
                .map(String::as_str)
                .filter(|name| !TITLE_KEYS.contains(name))
                .collect();
            Ok(percentage_of(&wide, &categories, &categories)?)
        }
        SpreadFormat::Long => Ok(counts),
    }
}

/// The 1/0 non-white flag as a composition category.
fn nonwhite_label(value: &Value) -> Value {
    match value.as_text() {
        Some("1") => Value::text(NONWHITE),
        Some("0") => Value::text(WHITE),
        _ => value.clone(),
    }
}

/// Long compositions share statistic names with the title summary, so they
/// are prefixed before joining.
fn attachable(composition: &Table, spread: SpreadFormat, prefix: &str) -> Result<Table> {
    let mut table = composition.clone();
    if spread == SpreadFormat::Long {
        for name in ["count", "median_salary", "mean_salary"] {
            table.rename_column(name, format!("{prefix}{name}"))?;
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("Wide".parse::<SpreadFormat>().unwrap(), SpreadFormat::Wide);
        assert_eq!(" long".parse::<SpreadFormat>().unwrap(), SpreadFormat::Long);
        assert_eq!("HIGH".parse::<HighLow>().unwrap(), HighLow::High);
        assert!(matches!(
            "middle".parse::<HighLow>(),
            Err(ReportError::InvalidArgument(_))
        ));
    }

    #[test]
    fn long_statistics_are_prefixed_for_joining() {
        let table = Table::new([
            "title_name",
            "title_code",
            "race_eth",
            "count",
            "median_salary",
            "mean_salary",
        ]);
        let prefixed = attachable(&table, SpreadFormat::Long, RACE_ETH_PREFIX).unwrap();
        assert_eq!(
            prefixed.columns(),
            [
                "title_name",
                "title_code",
                "race_eth",
                "race_eth_count",
                "race_eth_median_salary",
                "race_eth_mean_salary"
            ]
        );
    }
}
