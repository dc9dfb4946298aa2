//! Category mapping rendering

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::CategoryMapping;

/// Build the raw -> merged view of a mapping.
///
/// Rows follow `categories` (the WoE table order); mapping keys not listed
/// there are appended in key order.
pub fn build_mapping_table(feature: &str, categories: &[String], mapping: &CategoryMapping) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new(feature).add_attribute(Attribute::Bold),
        Cell::new("Group label").add_attribute(Attribute::Bold),
    ]);

    let extra = mapping.keys().filter(|k| !categories.contains(k));

    for raw in categories.iter().chain(extra) {
        let Some(label) = mapping.get(raw) else {
            continue;
        };

        let label_cell = if label == raw {
            Cell::new(label).add_attribute(Attribute::Dim)
        } else {
            Cell::new(label).fg(Color::Cyan)
        };
        table.add_row(vec![Cell::new(raw), label_cell]);
    }

    table
}

/// Number of distinct labels a mapping produces
pub fn group_count(mapping: &CategoryMapping) -> usize {
    let mut labels: Vec<&String> = mapping.values().collect();
    labels.sort();
    labels.dedup();
    labels.len()
}

/// Print a category mapping
pub fn print_mapping(feature: &str, categories: &[String], mapping: &CategoryMapping) {
    println!();
    println!(
        "    {} {} {}",
        style("🔗").cyan(),
        style("CATEGORY MAPPING").white().bold(),
        style(format!(
            "({} categories → {} groups)",
            mapping.len(),
            group_count(mapping)
        ))
        .dim()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    for line in build_mapping_table(feature, categories, mapping)
        .to_string()
        .lines()
    {
        println!("    {}", line);
    }
}
