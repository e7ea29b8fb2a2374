//! Typed references to the columns of an enriched record.
//!
//! Aggregations and group keys name a [`Field`] instead of a string column
//! so that the operation can be validated against the field kind before
//! any rows are touched.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::EmployeeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Categorical,
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Agency,
    TitleName,
    TitleCode,
    Gender,
    Race,
    Ethnicity,
    RaceEth,
    EmployeeStatus,
    TitleClassification,
    Nonwhite,
    NonwhiteFemale,
    Uniform,
    BaseSalary,
    MinSalary,
    MaxSalary,
    AgeYears,
    DaysFromStart,
    YearsFromStart,
}

impl Field {
    pub const ALL: [Field; 18] = [
        Field::Agency,
        Field::TitleName,
        Field::TitleCode,
        Field::Gender,
        Field::Race,
        Field::Ethnicity,
        Field::RaceEth,
        Field::EmployeeStatus,
        Field::TitleClassification,
        Field::Nonwhite,
        Field::NonwhiteFemale,
        Field::Uniform,
        Field::BaseSalary,
        Field::MinSalary,
        Field::MaxSalary,
        Field::AgeYears,
        Field::DaysFromStart,
        Field::YearsFromStart,
    ];

    /// Column name used in report tables.
    pub fn name(self) -> &'static str {
        match self {
            Field::Agency => "agency",
            Field::TitleName => "title_name",
            Field::TitleCode => "title_code",
            Field::Gender => "gender",
            Field::Race => "race",
            Field::Ethnicity => "ethnicity",
            Field::RaceEth => "race_eth",
            Field::EmployeeStatus => "employee_status",
            Field::TitleClassification => "title_classification",
            Field::Nonwhite => "nonwhite",
            Field::NonwhiteFemale => "nonwhite_female",
            Field::Uniform => "uniform",
            Field::BaseSalary => "base_salary",
            Field::MinSalary => "min_salary",
            Field::MaxSalary => "max_salary",
            Field::AgeYears => "age_years",
            Field::DaysFromStart => "days_from_start",
            Field::YearsFromStart => "years_from_start",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::BaseSalary
            | Field::MinSalary
            | Field::MaxSalary
            | Field::AgeYears
            | Field::DaysFromStart
            | Field::YearsFromStart => FieldKind::Numeric,
            _ => FieldKind::Categorical,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.kind() == FieldKind::Numeric
    }

    /// Categorical value of the field, or None for numeric fields and an
    /// absent uniform tag. The non-white flags render as `1`/`0`.
    pub fn text(self, record: &EmployeeRecord) -> Option<Cow<'_, str>> {
        let value = match self {
            Field::Agency => Cow::Borrowed(record.agency.as_str()),
            Field::TitleName => Cow::Borrowed(record.title_name.as_str()),
            Field::TitleCode => Cow::Borrowed(record.title_code.as_str()),
            Field::Gender => Cow::Borrowed(record.gender.as_str()),
            Field::Race => Cow::Borrowed(record.race.as_str()),
            Field::Ethnicity => Cow::Borrowed(record.ethnicity.as_str()),
            Field::RaceEth => Cow::Owned(record.race_eth.label()),
            Field::EmployeeStatus => Cow::Borrowed(record.employee_status.as_str()),
            Field::TitleClassification => Cow::Borrowed(record.title_classification.as_str()),
            Field::Nonwhite => Cow::Borrowed(flag_label(record.nonwhite)),
            Field::NonwhiteFemale => Cow::Borrowed(flag_label(record.nonwhite_female)),
            Field::Uniform => Cow::Borrowed(if record.uniform? { "yes" } else { "no" }),
            _ => return None,
        };
        Some(value)
    }

    /// Numeric value of the field, or None for categorical fields and null
    /// salary bounds.
    pub fn number(self, record: &EmployeeRecord) -> Option<f64> {
        match self {
            Field::BaseSalary => Some(record.base_salary),
            Field::MinSalary => record.min_salary,
            Field::MaxSalary => record.max_salary,
            Field::AgeYears => Some(record.age_years as f64),
            Field::DaysFromStart => Some(record.days_from_start as f64),
            Field::YearsFromStart => Some(record.years_from_start as f64),
            _ => None,
        }
    }
}

fn flag_label(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownField(needle.to_string()))
    }
}
