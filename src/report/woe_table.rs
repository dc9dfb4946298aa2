//! WoE table rendering

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{PeriodicWoeTable, WoeRow, WoeTable};
use crate::utils::format_stat;

fn header_cells(leading: &[&str]) -> Vec<Cell> {
    leading
        .iter()
        .chain(
            [
                "Events",
                "Non-events",
                "Event rate",
                "Non-event rate",
                "Exposure",
                "WoE",
                "IV",
            ]
            .iter(),
        )
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
        .collect()
}

fn row_cells(row: &WoeRow) -> Vec<Cell> {
    // Infinite WoE marks a bin holding a single class
    let woe_color = if row.woe.is_infinite() {
        Color::Red
    } else {
        Color::White
    };

    let mut cells = vec![
        Cell::new(row.n_events),
        Cell::new(row.n_non_events),
        Cell::new(format_stat(row.event_rate)),
        Cell::new(format_stat(row.non_event_rate)),
        Cell::new(format_stat(row.exposure)),
        Cell::new(format_stat(row.woe)).fg(woe_color),
        Cell::new(format_stat(row.iv)),
    ];

    if row.is_total() {
        cells = cells
            .into_iter()
            .map(|c| c.add_attribute(Attribute::Bold))
            .collect();
    }
    cells
}

/// Build the comfy-table view of a WoE table.
///
/// Category rows are numbered from 0; these are the indices group
/// definitions refer to.
pub fn build_woe_table(table: &WoeTable) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL_CONDENSED);
    out.set_header(header_cells(&["#", table.feature.as_str()]));

    // The totals row is always last, so row positions are category indices
    for (index, row) in table.rows.iter().enumerate() {
        let mut cells = if row.is_total() {
            vec![
                Cell::new(""),
                Cell::new(&row.category)
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold),
            ]
        } else {
            vec![
                Cell::new(index).add_attribute(Attribute::Dim),
                Cell::new(&row.category),
            ]
        };
        cells.extend(row_cells(row));
        out.add_row(cells);
    }

    out
}

/// Build the comfy-table view of a periodic WoE table
pub fn build_periodic_table(table: &PeriodicWoeTable) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL_CONDENSED);
    out.set_header(header_cells(&["Period", table.feature.as_str()]));

    for r in &table.rows {
        let mut cells = vec![Cell::new(&r.period), Cell::new(&r.row.category)];
        cells.extend(row_cells(&r.row));
        out.add_row(cells);
    }

    out
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Print a WoE table with its total IV
pub fn print_woe_table(table: &WoeTable) {
    println!();
    println!(
        "    {} {} {}",
        style("📋").cyan(),
        style("WOE TABLE").white().bold(),
        style(format!("({})", table.feature)).dim()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    print_indented(&build_woe_table(table));

    println!();
    println!(
        "      Information Value: {}",
        style(format_stat(table.iv_total())).yellow().bold()
    );
}

/// Print a periodic WoE table
pub fn print_periodic_table(table: &PeriodicWoeTable) {
    println!();
    println!(
        "    {} {} {}",
        style("📋").cyan(),
        style("WOE BY PERIOD").white().bold(),
        style(format!("({} period(s))", table.periods().len())).dim()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    print_indented(&build_periodic_table(table));
}
