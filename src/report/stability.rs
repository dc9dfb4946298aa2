//! WoE stability across periods
//!
//! Summarizes, per category, how far its WoE moves between periods. A wide
//! spread (or a category missing from some periods) means the global grouping
//! may not hold over time.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::PeriodicWoeTable;
use crate::utils::format_stat;

/// Default WoE spread above which a category is flagged as drifting
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.5;

/// WoE range of one category across periods
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStability {
    pub category: String,
    /// Number of periods the category appears in
    pub periods: usize,
    pub min_woe: f64,
    pub max_woe: f64,
    /// max_woe - min_woe (0.0 when both are the same infinity)
    pub spread: f64,
    pub drifting: bool,
}

/// Stability summary of one feature
#[derive(Debug, Clone, PartialEq)]
pub struct StabilitySummary {
    pub feature: String,
    pub total_periods: usize,
    pub drift_threshold: f64,
    /// Categories in first-seen order
    pub categories: Vec<CategoryStability>,
}

impl StabilitySummary {
    pub fn from_periodic(table: &PeriodicWoeTable, drift_threshold: f64) -> Self {
        let total_periods = table.periods().len();
        let mut categories: Vec<CategoryStability> = Vec::new();

        for r in &table.rows {
            let woe = r.row.woe;
            match categories.iter_mut().find(|c| c.category == r.row.category) {
                Some(entry) => {
                    entry.periods += 1;
                    entry.min_woe = entry.min_woe.min(woe);
                    entry.max_woe = entry.max_woe.max(woe);
                }
                None => categories.push(CategoryStability {
                    category: r.row.category.clone(),
                    periods: 1,
                    min_woe: woe,
                    max_woe: woe,
                    spread: 0.0,
                    drifting: false,
                }),
            }
        }

        for entry in &mut categories {
            entry.spread = if entry.max_woe == entry.min_woe {
                0.0
            } else {
                entry.max_woe - entry.min_woe
            };
            entry.drifting = entry.spread > drift_threshold || entry.periods < total_periods;
        }

        Self {
            feature: table.feature.clone(),
            total_periods,
            drift_threshold,
            categories,
        }
    }

    pub fn drifting_categories(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| c.drifting)
            .map(|c| c.category.as_str())
            .collect()
    }

    pub fn build_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new(&self.feature).add_attribute(Attribute::Bold),
            Cell::new("Periods").add_attribute(Attribute::Bold),
            Cell::new("Min WoE").add_attribute(Attribute::Bold),
            Cell::new("Max WoE").add_attribute(Attribute::Bold),
            Cell::new("Spread").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

        for c in &self.categories {
            let status = if c.periods < self.total_periods {
                Cell::new("missing periods").fg(Color::Yellow)
            } else if c.drifting {
                Cell::new("drifting").fg(Color::Red)
            } else {
                Cell::new("stable").fg(Color::Green)
            };

            table.add_row(vec![
                Cell::new(&c.category),
                Cell::new(format!("{}/{}", c.periods, self.total_periods)),
                Cell::new(format_stat(c.min_woe)),
                Cell::new(format_stat(c.max_woe)),
                Cell::new(format_stat(c.spread)),
                status,
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {} {}",
            style("📈").cyan(),
            style("WOE STABILITY").white().bold(),
            style(format!("(spread threshold {:.2})", self.drift_threshold)).dim()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        for line in self.build_table().to_string().lines() {
            println!("    {}", line);
        }
    }
}
