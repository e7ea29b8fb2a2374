//! Pipeline stages shared by every report: read, normalize, derive.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use payeq_ingest::{load_uniform_titles, normalize_columns, read_payroll_csv};
use payeq_transform::{Derived, derive};
use tracing::{info, info_span, warn};

use crate::config::AnalysisConfig;
use crate::logging::redact_value;

/// Counts reported after each run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub input_rows: usize,
    pub skipped: usize,
    pub filtered_out: usize,
    pub report_rows: usize,
}

impl RunSummary {
    pub fn from_derived(derived: &Derived, report_rows: usize) -> Self {
        Self {
            input_rows: derived.input_rows,
            skipped: derived.skipped,
            filtered_out: derived.filtered_out,
            report_rows,
        }
    }
}

/// Read the payroll CSV and derive enriched records.
pub fn load_records(input: &Path, config: &AnalysisConfig) -> Result<Derived> {
    let ingest_span = info_span!("ingest", path = %input.display());
    let ingest_start = Instant::now();
    let frame = ingest_span.in_scope(|| -> Result<_> {
        let raw = read_payroll_csv(input)
            .with_context(|| format!("read payroll {}", input.display()))?;
        let frame = normalize_columns(raw, &config.column_names()).context("normalize columns")?;
        info!(
            rows = frame.height(),
            columns = frame.width(),
            duration_ms = ingest_start.elapsed().as_millis(),
            "payroll loaded"
        );
        Ok(frame)
    })?;

    let uniform_titles = match &config.uniform_titles {
        Some(path) => Some(
            load_uniform_titles(path)
                .with_context(|| format!("read uniform titles {}", path.display()))?,
        ),
        None => None,
    };
    let options = config.derive_options(uniform_titles);

    let derive_start = Instant::now();
    let derived = derive(&frame, &options).context("derive attributes")?;
    info!(
        records = derived.records.len(),
        duration_ms = derive_start.elapsed().as_millis(),
        "records derived"
    );
    if let Some(error) = &derived.first_malformed {
        warn!(
            row = error.row,
            column = %error.column,
            value = redact_value(&error.value),
            expected = error.expected,
            "first malformed row skipped"
        );
    }
    Ok(derived)
}
