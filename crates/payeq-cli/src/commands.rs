use anyhow::{Context, Result};
use payeq_cli::config::AnalysisConfig;
use payeq_cli::export::{sibling_path, write_records_csv, write_table_csv};
use payeq_cli::pipeline::{RunSummary, load_records};
use payeq_cli::summary::print_report;
use payeq_core::Table;
use payeq_report::{
    GenderOptions, RaceEthOptions, ShareOptions, gender_composition, populous_title_profile,
    race_eth_composition, share_by_variable,
};
use payeq_transform::Derived;
use tracing::info_span;

use crate::cli::{CommonArgs, GenderArgs, PopulousArgs, RaceEthArgs, ShareArgs};

/// A titled report table; the first one of a run is the primary output.
struct Section {
    name: &'static str,
    title: String,
    table: Table,
}

fn resolve_config(common: &CommonArgs) -> Result<AnalysisConfig> {
    let base = match &common.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    Ok(base.with_overrides(common.overrides()))
}

fn prepare(common: &CommonArgs) -> Result<Derived> {
    let config = resolve_config(common)?;
    let derived = load_records(&common.input, &config)?;
    if let Some(path) = &common.records_output {
        write_records_csv(&derived.records, path).context("export enriched records")?;
    }
    Ok(derived)
}

/// Print or export the sections and return the run summary.
fn emit(common: &CommonArgs, derived: &Derived, sections: &[Section]) -> Result<RunSummary> {
    let report_rows = sections.first().map_or(0, |section| section.table.height());
    match &common.output {
        Some(path) => {
            for (idx, section) in sections.iter().enumerate() {
                let target = if idx == 0 {
                    path.clone()
                } else {
                    sibling_path(path, section.name)
                };
                write_table_csv(&section.table, &target)
                    .with_context(|| format!("export {}", section.name))?;
                println!("{}: {}", section.title, target.display());
            }
        }
        None => {
            for section in sections {
                print_report(&section.title, &section.table);
                println!();
            }
        }
    }
    Ok(RunSummary::from_derived(derived, report_rows))
}

pub fn run_gender(args: &GenderArgs) -> Result<RunSummary> {
    let span = info_span!("report", kind = "gender", agency = %args.agency);
    let _guard = span.enter();
    let derived = prepare(&args.common)?;
    let options = GenderOptions::new(&args.agency).with_exportable(args.exportable);
    let table = gender_composition(&derived.records, &options).context("gender composition")?;
    let sections = [Section {
        name: "gender",
        title: format!("Gender composition: {}", args.agency),
        table,
    }];
    emit(&args.common, &derived, &sections)
}

pub fn run_race_eth(args: &RaceEthArgs) -> Result<RunSummary> {
    let span = info_span!("report", kind = "race-eth");
    let _guard = span.enter();
    let derived = prepare(&args.common)?;
    let mut options = RaceEthOptions::new().with_spread(args.spread.into());
    if let Some(agency) = &args.agency {
        options = options.with_agency(agency);
    }
    if let Some(direction) = args.high_low {
        options = options.with_high_low(direction.into());
    }
    let report =
        race_eth_composition(&derived.records, &options).context("race/ethnicity composition")?;
    let scope = args.agency.as_deref().unwrap_or("all agencies");
    let sections = [
        Section {
            name: "ranked",
            title: format!("Titles ranked by median salary: {scope}"),
            table: report.ranked,
        },
        Section {
            name: "composition",
            title: "Race/ethnicity by title".to_string(),
            table: report.composition,
        },
        Section {
            name: "nonwhite",
            title: "White/nonwhite by title".to_string(),
            table: report.nonwhite,
        },
    ];
    emit(&args.common, &derived, &sections)
}

pub fn run_share(args: &ShareArgs) -> Result<RunSummary> {
    let span = info_span!("report", kind = "share", variable = %args.variable);
    let _guard = span.enter();
    let derived = prepare(&args.common)?;
    let options = ShareOptions::new(args.variable, &args.value).with_binning(!args.no_binning);
    let table = share_by_variable(&derived.records, &options).context("share by variable")?;
    let sections = [Section {
        name: "share",
        title: format!("Share of {} = {} by title", args.variable, args.value),
        table,
    }];
    emit(&args.common, &derived, &sections)
}

pub fn run_populous(args: &PopulousArgs) -> Result<RunSummary> {
    let span = info_span!("report", kind = "populous", top_n = args.top_n);
    let _guard = span.enter();
    let derived = prepare(&args.common)?;
    let table = populous_title_profile(&derived.records, args.top_n)
        .context("populous title profile")?;
    let sections = [Section {
        name: "populous",
        title: format!("Top {} titles per agency", args.top_n),
        table,
    }];
    emit(&args.common, &derived, &sections)
}
