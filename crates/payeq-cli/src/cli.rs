//! CLI argument definitions for the `payeq` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use payeq_cli::config::AnalysisConfig;
use payeq_model::Field;
use payeq_report::{HighLow, SpreadFormat};

#[derive(Parser)]
#[command(
    name = "payeq",
    version,
    about = "Pay-equity reports over municipal payroll data",
    long_about = "Derive tenure, age and race/ethnicity attributes from a payroll CSV\n\
                  and report gender and race/ethnicity composition by title."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow salary and age values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Male/female composition of an agency's titles.
    Gender(GenderArgs),

    /// Race/ethnicity composition of titles ranked by median salary.
    RaceEth(RaceEthArgs),

    /// Per-title share of a categorical value, binned by share.
    Share(ShareArgs),

    /// Most populous titles per agency.
    Populous(PopulousArgs),
}

/// Input and derivation options shared by every report.
#[derive(Args)]
pub struct CommonArgs {
    /// Payroll CSV to analyse.
    #[arg(value_name = "PAYROLL_CSV")]
    pub input: PathBuf,

    /// Year whose December 31st anchors tenure and age.
    #[arg(long = "reference-year", value_name = "YEAR")]
    pub reference_year: Option<i32>,

    /// Employee-status filter: full-time, part-time, or anything else for all.
    #[arg(long = "status-filter", value_name = "PROFILE")]
    pub status_filter: Option<String>,

    /// Drop rows with unparseable dates or amounts instead of failing.
    #[arg(long = "skip-malformed")]
    pub skip_malformed: bool,

    /// Explicit input column names, applied positionally.
    #[arg(long = "columns", value_name = "NAMES", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// CSV of uniform title codes.
    #[arg(long = "uniform-titles", value_name = "PATH")]
    pub uniform_titles: Option<PathBuf>,

    /// TOML analysis config; flags take precedence over its values.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the report as CSV instead of printing it.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the enriched records (derived attributes included) as CSV.
    #[arg(long = "records-output", value_name = "PATH")]
    pub records_output: Option<PathBuf>,
}

impl CommonArgs {
    /// Flag values as config overrides.
    pub fn overrides(&self) -> AnalysisConfig {
        AnalysisConfig {
            reference_year: self.reference_year,
            status_filter: self.status_filter.clone(),
            skip_malformed: self.skip_malformed,
            columns: self.columns.clone(),
            uniform_titles: self.uniform_titles.clone(),
        }
    }
}

#[derive(Args)]
pub struct GenderArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Agency to report on.
    #[arg(long = "agency", value_name = "NAME")]
    pub agency: String,

    /// Publishable output: fewer columns and small cells suppressed.
    #[arg(long = "exportable")]
    pub exportable: bool,
}

#[derive(Args)]
pub struct RaceEthArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Restrict to one agency.
    #[arg(long = "agency", value_name = "NAME")]
    pub agency: Option<String>,

    /// Rank titles by median salary, highest or lowest first.
    #[arg(long = "high-low", value_enum)]
    pub high_low: Option<HighLowArg>,

    /// Layout of composition tables.
    #[arg(long = "spread", value_enum, default_value = "wide")]
    pub spread: SpreadArg,
}

#[derive(Args)]
pub struct ShareArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Categorical field to compare, e.g. gender or race_eth.
    #[arg(long = "variable", value_name = "FIELD")]
    pub variable: Field,

    /// Value counted towards the share, e.g. Female.
    #[arg(long = "value", value_name = "VALUE")]
    pub value: String,

    /// Report per-record shares instead of share bins.
    #[arg(long = "no-binning")]
    pub no_binning: bool,
}

#[derive(Args)]
pub struct PopulousArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Titles kept per agency.
    #[arg(long = "top-n", value_name = "N", default_value_t = 1)]
    pub top_n: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HighLowArg {
    High,
    Low,
}

impl From<HighLowArg> for HighLow {
    fn from(value: HighLowArg) -> Self {
        match value {
            HighLowArg::High => HighLow::High,
            HighLowArg::Low => HighLow::Low,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SpreadArg {
    Wide,
    Long,
}

impl From<SpreadArg> for SpreadFormat {
    fn from(value: SpreadArg) -> Self {
        match value {
            SpreadArg::Wide => SpreadFormat::Wide,
            SpreadArg::Long => SpreadFormat::Long,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
