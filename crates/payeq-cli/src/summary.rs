//! Terminal rendering of report tables and the run summary.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use payeq_core::{Table as ReportTable, Value};

use crate::pipeline::RunSummary;

/// Render a report table; numeric columns are right-aligned and missing
/// cells show as a dim dash.
pub fn render_report(report: &ReportTable) -> Table {
    let mut table = Table::new();
    table.set_header(report.columns().iter().map(|name| header_cell(name)));
    apply_table_style(&mut table);
    for row in report.rows() {
        table.add_row(row.iter().map(value_cell));
    }
    for (idx, name) in report.columns().iter().enumerate() {
        let numeric = report
            .column(name)
            .is_ok_and(|values| values.iter().any(|value| matches!(value, Value::Number(_))));
        if numeric {
            align_column(&mut table, idx, CellAlignment::Right);
        }
    }
    table
}

pub fn print_report(title: &str, report: &ReportTable) {
    println!("{title}");
    if report.is_empty() {
        println!("(no rows)");
        return;
    }
    println!("{}", render_report(report));
}

/// Plain-text counts printed after each run.
pub fn render_run_summary(summary: &RunSummary) -> String {
    format!(
        "input rows:   {}\nskipped rows: {}\nfiltered out: {}\nreport rows:  {}",
        summary.input_rows, summary.skipped, summary.filtered_out, summary.report_rows
    )
}

pub fn print_run_summary(summary: &RunSummary) {
    println!();
    println!("{}", render_run_summary(summary));
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn value_cell(value: &Value) -> Cell {
    match value {
        Value::Missing => dim_cell("-"),
        other => Cell::new(other),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
