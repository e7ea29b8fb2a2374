//! Configuration options for record normalization and derivation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::schema::DEFAULT_COLUMNS;

/// Employee-status filter profile applied after derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    /// Full-time, salary >= 15000, age >= 16, classified title.
    FullTime,
    /// Part-time, salary >= 13, age >= 1, classified title.
    PartTime,
    /// Keep every record.
    #[default]
    All,
}

impl StatusFilter {
    /// Any value other than `full-time` or `part-time` disables filtering.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "full-time" => Self::FullTime,
            "part-time" => Self::PartTime,
            _ => Self::All,
        }
    }
}

/// What to do with rows whose dates or numbers cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParsePolicy {
    /// Abort the whole batch on the first malformed row.
    #[default]
    FailBatch,
    /// Drop malformed rows and report how many were dropped.
    SkipMalformed,
}

/// Target names applied to the input columns, positionally.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnNames {
    /// The standard 25-column payroll layout.
    #[default]
    Default,
    Explicit(Vec<String>),
}

impl ColumnNames {
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::Default => DEFAULT_COLUMNS.iter().map(|name| name.to_string()).collect(),
            Self::Explicit(names) => names.clone(),
        }
    }
}

/// Options for the attribute deriver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeriveOptions {
    /// Year whose December 31st anchors tenure and age. Required.
    pub reference_year: Option<i32>,
    pub status_filter: StatusFilter,
    pub parse_policy: ParsePolicy,
    /// Title codes of uniformed titles. When set, every record is tagged.
    pub uniform_titles: Option<BTreeSet<String>>,
}

impl DeriveOptions {
    pub fn new(reference_year: i32) -> Self {
        Self {
            reference_year: Some(reference_year),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_status_filter(mut self, filter: StatusFilter) -> Self {
        self.status_filter = filter;
        self
    }

    #[must_use]
    pub fn with_parse_policy(mut self, policy: ParsePolicy) -> Self {
        self.parse_policy = policy;
        self
    }

    #[must_use]
    pub fn with_uniform_titles(mut self, titles: BTreeSet<String>) -> Self {
        self.uniform_titles = Some(titles);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_falls_back_to_pass_through() {
        assert_eq!(StatusFilter::parse("full-time"), StatusFilter::FullTime);
        assert_eq!(StatusFilter::parse("part-time"), StatusFilter::PartTime);
        assert_eq!(StatusFilter::parse("Full-Time"), StatusFilter::All);
        assert_eq!(StatusFilter::parse(""), StatusFilter::All);
    }

    #[test]
    fn default_column_names_have_25_entries() {
        assert_eq!(ColumnNames::Default.names().len(), 25);
        let explicit = ColumnNames::Explicit(vec!["a".into(), "b".into()]);
        assert_eq!(explicit.names(), vec!["a", "b"]);
    }
}
