//! Most populous titles per agency.

use payeq_core::{
    Aggregation, SortOrder, Table, Value, group_records, group_summarize, top_n_per_group,
};
use payeq_model::{EmployeeRecord, Field};
use tracing::{debug_span, info};

use crate::common::DECIMALS;
use crate::error::{ReportError, Result};

/// Output columns, in order.
pub const POPULOUS_COLUMNS: [&str; 14] = [
    "agency",
    "title_name",
    "title_code",
    "worker_count",
    "agency_count",
    "share_of_agency",
    "median_salary",
    "mean_salary",
    "median_age",
    "median_tenure",
    "top_race_eth",
    "race_eth_share",
    "top_gender",
    "gender_share",
];

const TITLE_GROUP: [Field; 3] = [Field::Agency, Field::TitleName, Field::TitleCode];

/// The `top_n` most populous titles of each agency with their salary,
/// age and tenure medians and the most frequent race_eth and gender.
///
/// Ties on headcount keep key order; the most frequent category is chosen
/// the same way. Rows are grouped by agency, most populous title first.
pub fn populous_title_profile(records: &[EmployeeRecord], top_n: usize) -> Result<Table> {
    let span = debug_span!("populous_title_profile", records = records.len(), top_n);
    let _guard = span.enter();

    if top_n == 0 {
        return Err(ReportError::InvalidArgument(
            "top_n_titles must be at least 1".to_string(),
        ));
    }

    let agencies = group_records(records, &[Field::Agency])?;
    let titles = group_summarize(
        records,
        &TITLE_GROUP,
        &[
            Aggregation::count("worker_count"),
            Aggregation::median(Field::BaseSalary, "median_salary"),
            Aggregation::mean(Field::BaseSalary, "mean_salary"),
            Aggregation::median(Field::AgeYears, "median_age"),
            Aggregation::median(Field::YearsFromStart, "median_tenure"),
        ],
    )?;
    let top = top_n_per_group(&titles, &["agency"], "worker_count", top_n)?
        .sort_by("agency", SortOrder::Ascending)?;
    let title_groups = group_records(records, &TITLE_GROUP)?;

    let mut table = Table::new(POPULOUS_COLUMNS);
    for row in top.iter_rows() {
        let key: Vec<String> = ["agency", "title_name", "title_code"]
            .iter()
            .map(|name| row.get(name).map(Value::key).unwrap_or_default())
            .collect();
        let workers = row.number("worker_count").unwrap_or(0.0);
        let agency_count = agencies
            .get(&key[..1])
            .map_or(0.0, |group| group.len() as f64);
        let members = title_groups.get(&key).map(Vec::as_slice).unwrap_or_default();
        let (top_race_eth, race_eth_share) = most_frequent(members, Field::RaceEth)?;
        let (top_gender, gender_share) = most_frequent(members, Field::Gender)?;

        let value = |name: &str| row.get(name).cloned().unwrap_or(Value::Missing);
        table.push_row(vec![
            value("agency"),
            value("title_name"),
            value("title_code"),
            Value::Number(workers),
            Value::Number(agency_count),
            Value::from((agency_count > 0.0).then(|| workers / agency_count)),
            value("median_salary"),
            value("mean_salary"),
            value("median_age"),
            value("median_tenure"),
            top_race_eth,
            race_eth_share,
            top_gender,
            gender_share,
        ])?;
    }
    table.round(DECIMALS);
    info!(rows = table.height(), "populous title profile ready");
    Ok(table)
}

/// The most frequent value of `field` among `members` and its share.
fn most_frequent(members: &[&EmployeeRecord], field: Field) -> Result<(Value, Value)> {
    let counts = group_summarize(members.iter().copied(), &[field], &[Aggregation::count("n")])?;
    let top = top_n_per_group(&counts, &[], "n", 1)?;
    let Some(row) = top.row(0) else {
        return Ok((Value::Missing, Value::Missing));
    };
    let category = row.get(field.name()).cloned().unwrap_or(Value::Missing);
    let share = row.number("n").map(|n| n / members.len() as f64);
    Ok((category, Value::from(share)))
}
