//! Categorical values carried by payroll records.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ETHNICITY_HISPANIC: &str = "Hispanic or Latino";
pub const UNKNOWN_OR_UNDISCLOSED: &str = "Unknown or Choose Not to Disclose";
pub const RACE_WHITE: &str = "White";
pub const RACE_BLACK: &str = "Black or African American";
pub const RACE_ASIAN: &str = "Asian";
pub const RACE_PACIFIC_ISLANDER: &str = "Native Hawaiian or Pacific Islander";
pub const RACE_AMERICAN_INDIAN: &str = "American Indian or Alaska Native";
pub const RACE_AMERICAN_INDIAN_ALT: &str = "American Indian/Alaska Native";
pub const RACE_TWO_OR_MORE: &str = "Two or more races";

/// Gender as reported on the payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl Gender {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Male" => Self::Male,
            "Female" => Self::Female,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    FullTime,
    PartTime,
    Other(String),
}

impl EmployeeStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Full-Time" => Self::FullTime,
            "Part-Time" => Self::PartTime,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::FullTime => "Full-Time",
            Self::PartTime => "Part-Time",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TitleClassification {
    Competitive,
    NonCompetitive,
    Other(String),
}

impl TitleClassification {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Competitive" => Self::Competitive,
            "Non-Competitive" => Self::NonCompetitive,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Competitive => "Competitive",
            Self::NonCompetitive => "Non-Competitive",
            Self::Other(value) => value,
        }
    }

    /// Competitive and non-competitive titles are the ones kept by the
    /// employee-status filter profiles.
    pub fn is_classified(&self) -> bool {
        matches!(self, Self::Competitive | Self::NonCompetitive)
    }
}

impl fmt::Display for TitleClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined race/ethnicity category.
///
/// Variant order is the level order used for wide-format columns.
/// `NonHispanic` holds a race value outside the recognised set and renders
/// as `"NH " + race`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RaceEth {
    HispanicOrLatino,
    NhAsian,
    NhBlack,
    NhWhite,
    NhSorOrRaceUcnd,
    EthnicityUnknown,
    NonHispanic(String),
}

impl RaceEth {
    /// The six defined categories in level order.
    pub const LEVELS: [RaceEth; 6] = [
        RaceEth::HispanicOrLatino,
        RaceEth::NhAsian,
        RaceEth::NhBlack,
        RaceEth::NhWhite,
        RaceEth::NhSorOrRaceUcnd,
        RaceEth::EthnicityUnknown,
    ];

    pub fn label(&self) -> String {
        match self {
            Self::HispanicOrLatino => ETHNICITY_HISPANIC.to_string(),
            Self::NhAsian => "NH Asian".to_string(),
            Self::NhBlack => format!("NH {RACE_BLACK}"),
            Self::NhWhite => format!("NH {RACE_WHITE}"),
            Self::NhSorOrRaceUcnd => "NH SOR or Race UCND".to_string(),
            Self::EthnicityUnknown => format!("Ethnicity {UNKNOWN_OR_UNDISCLOSED}"),
            Self::NonHispanic(race) => format!("NH {race}"),
        }
    }

    pub fn level_labels() -> Vec<String> {
        Self::LEVELS.iter().map(Self::label).collect()
    }
}

impl fmt::Display for RaceEth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
