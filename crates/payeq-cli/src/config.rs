//! Analysis configuration: an optional TOML file overridden by CLI flags.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use payeq_model::{ColumnNames, DeriveOptions, ParsePolicy, StatusFilter};
use serde::Deserialize;

/// Settings shared by every report.
///
/// ```toml
/// reference_year = 2023
/// status_filter = "full-time"
/// skip_malformed = true
/// uniform_titles = "uniform_titles.csv"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub reference_year: Option<i32>,
    /// `full-time`, `part-time`; anything else keeps every record.
    pub status_filter: Option<String>,
    pub skip_malformed: bool,
    /// Explicit input column names, applied positionally.
    pub columns: Option<Vec<String>>,
    /// CSV listing uniform title codes.
    pub uniform_titles: Option<PathBuf>,
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        // Relative reference paths are resolved against the config file.
        if let Some(dir) = path.parent() {
            config.uniform_titles = config.uniform_titles.map(|titles| {
                if titles.is_relative() {
                    dir.join(titles)
                } else {
                    titles
                }
            });
        }
        Ok(config)
    }

    /// Values set in `overrides` replace ours; `skip_malformed` is sticky.
    #[must_use]
    pub fn with_overrides(self, overrides: AnalysisConfig) -> Self {
        Self {
            reference_year: overrides.reference_year.or(self.reference_year),
            status_filter: overrides.status_filter.or(self.status_filter),
            skip_malformed: overrides.skip_malformed || self.skip_malformed,
            columns: overrides.columns.or(self.columns),
            uniform_titles: overrides.uniform_titles.or(self.uniform_titles),
        }
    }

    pub fn column_names(&self) -> ColumnNames {
        self.columns
            .clone()
            .map_or(ColumnNames::Default, ColumnNames::Explicit)
    }

    /// Deriver options. A missing reference year is left unset so the
    /// deriver reports it.
    pub fn derive_options(&self, uniform_titles: Option<BTreeSet<String>>) -> DeriveOptions {
        let mut options = DeriveOptions {
            reference_year: self.reference_year,
            ..DeriveOptions::default()
        };
        if let Some(filter) = &self.status_filter {
            options = options.with_status_filter(StatusFilter::parse(filter));
        }
        if self.skip_malformed {
            options = options.with_parse_policy(ParsePolicy::SkipMalformed);
        }
        if let Some(titles) = uniform_titles {
            options = options.with_uniform_titles(titles);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml() {
        let config: AnalysisConfig = toml::from_str(
            r#"
reference_year = 2023
status_filter = "full-time"
columns = ["a", "b"]
"#,
        )
        .unwrap();
        assert_eq!(config.reference_year, Some(2023));
        assert_eq!(
            config.column_names(),
            ColumnNames::Explicit(vec!["a".to_string(), "b".to_string()])
        );
        let options = config.derive_options(None);
        assert_eq!(options.status_filter, StatusFilter::FullTime);
        assert_eq!(options.parse_policy, ParsePolicy::FailBatch);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<AnalysisConfig>("year = 2023").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let file = AnalysisConfig {
            reference_year: Some(2020),
            status_filter: Some("part-time".to_string()),
            ..AnalysisConfig::default()
        };
        let flags = AnalysisConfig {
            reference_year: Some(2023),
            skip_malformed: true,
            ..AnalysisConfig::default()
        };
        let merged = file.with_overrides(flags);
        assert_eq!(merged.reference_year, Some(2023));
        assert_eq!(merged.status_filter.as_deref(), Some("part-time"));
        assert!(merged.skip_malformed);
    }

    #[test]
    fn missing_year_stays_unset() {
        let options = AnalysisConfig::default().derive_options(None);
        assert_eq!(options.reference_year, None);
    }
}
