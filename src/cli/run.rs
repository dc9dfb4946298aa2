//! Command runners
//!
//! Each runner loads the dataset, calls into the pipeline and prints the
//! results. Pipeline code stays silent; everything the user sees is printed here.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::DataFrame;

use crate::pipeline::{
    apply_bins, apply_mapping, compute_periodic, compute_table, load_dataset_with_progress, save_dataset,
    CategoryMapper, PeriodGranularity,
};
use crate::report::{print_mapping, print_periodic_table, print_woe_table, StabilitySummary};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_config, print_info,
    print_step_header, print_success, print_warning,
};

use super::args::DataArgs;

/// Print the configuration card and load the dataset (step 1).
///
/// With `--bins` the feature column is replaced by its bin labels.
fn load_step(data: &DataArgs, extra: &[(&str, String)]) -> Result<DataFrame> {
    let mut card = vec![("Event value", data.event_value.clone())];
    if let Some(edges) = &data.bins {
        card.push(("Bin edges", format!("{:?}", edges)));
    }
    card.extend(extra.iter().cloned());
    print_config(&data.input, &data.target, &data.feature, &card);

    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let (df, rows, cols, memory_mb) =
        load_dataset_with_progress(&data.input, data.infer_schema_length)?;

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let df = match &data.bins {
        Some(edges) => {
            let binned = apply_bins(&df, &data.feature, edges, &data.feature)
                .with_context(|| format!("Failed to bin '{}'", data.feature))?;
            print_info(&format!(
                "Binned '{}' into {} interval(s)",
                data.feature,
                edges.len() + 1
            ));
            binned
        }
        None => df,
    };
    print_step_time(step_start);

    Ok(df)
}

fn print_step_time(start: Instant) {
    println!(
        "      {}",
        style(format!("({:.2}s)", start.elapsed().as_secs_f64())).dim()
    );
}

fn save_step(step: u8, df: &mut DataFrame, path: &Path) -> Result<()> {
    print_step_header(step, "Save Results");
    let spinner = create_spinner("Writing output file...");
    save_dataset(df, path)?;
    finish_with_success(&spinner, &format!("Saved to {}", path.display()));
    Ok(())
}

fn warn_infinite(categories: &[&str]) {
    if !categories.is_empty() {
        print_warning(&format!(
            "Infinite WoE for {} categor{} (single-class bins): {}",
            categories.len(),
            if categories.len() == 1 { "y" } else { "ies" },
            categories.join(", ")
        ));
    }
}

/// `woetrack table`
pub fn run_table(data: &DataArgs, no_totals: bool) -> Result<()> {
    let df = load_step(data, &[("Totals row", (!no_totals).to_string())])?;

    print_step_header(2, "WoE Table");
    let spinner = create_spinner("Computing WoE/IV...");
    let table = compute_table(
        &df,
        &data.target,
        &data.feature,
        &data.event_value,
        !no_totals,
    )
    .with_context(|| format!("Failed to compute WoE table of '{}'", data.feature))?;
    finish_with_success(&spinner, "WoE table computed");

    warn_infinite(&table.infinite_woe_categories());
    print_woe_table(&table);

    if let Some(output) = &data.output {
        save_step(3, &mut table.to_dataframe()?, output)?;
    }

    Ok(())
}

/// `woetrack periodic`
pub fn run_periodic(
    data: &DataArgs,
    date: &str,
    granularity: PeriodGranularity,
    drift_threshold: f64,
) -> Result<()> {
    let df = load_step(
        data,
        &[
            ("Date column", date.to_string()),
            ("Granularity", granularity.to_string()),
        ],
    )?;

    print_step_header(2, "WoE by Period");
    let spinner = create_spinner("Computing WoE per period...");
    let table = compute_periodic(
        &df,
        &data.target,
        &data.feature,
        date,
        &data.event_value,
        granularity,
    )
    .with_context(|| format!("Failed to compute periodic WoE of '{}'", data.feature))?;
    let computed = format!("{} period(s) computed", table.periods().len());
    if table.skipped_rows > 0 {
        finish_with_warning(&spinner, &computed);
        print_warning(&format!(
            "Skipped {} row(s) with a null '{}' value",
            table.skipped_rows, date
        ));
    } else {
        finish_with_success(&spinner, &computed);
    }
    print_periodic_table(&table);

    print_step_header(3, "Stability");
    let summary = StabilitySummary::from_periodic(&table, drift_threshold);
    summary.display();

    let drifting = summary.drifting_categories();
    if drifting.is_empty() {
        print_success("WoE is stable across periods");
    } else {
        print_warning(&format!(
            "{} categor{} drifting: {}",
            drifting.len(),
            if drifting.len() == 1 { "y is" } else { "ies are" },
            drifting.join(", ")
        ));
    }

    if let Some(output) = &data.output {
        save_step(4, &mut table.to_dataframe()?, output)?;
    }

    Ok(())
}

/// `woetrack group`
pub fn run_group(data: &DataArgs, groups: &[Vec<usize>], ordered: bool) -> Result<()> {
    let df = load_step(
        data,
        &[
            ("Groups", format!("{:?}", groups)),
            ("Ordered labels", ordered.to_string()),
        ],
    )?;

    print_step_header(2, "Global WoE Table");
    let table = compute_table(&df, &data.target, &data.feature, &data.event_value, true)
        .with_context(|| format!("Failed to compute WoE table of '{}'", data.feature))?;
    print_woe_table(&table);

    print_step_header(3, "Category Mapping");
    let mut mapper = CategoryMapper::new();
    let mapping = mapper
        .create_map(
            &table.to_dataframe()?,
            &data.feature,
            &data.feature,
            groups,
            ordered,
        )
        .with_context(|| format!("Failed to group categories of '{}'", data.feature))?;

    let categories: Vec<String> = table.category_rows().map(|r| r.category.clone()).collect();
    print_mapping(&data.feature, &categories, mapping);

    print_step_header(4, "Grouped WoE Table");
    let grouped_col = format!("{}_grouped", data.feature);
    let mut grouped = apply_mapping(&df, &data.feature, mapping, &grouped_col)?;
    let regrouped = compute_table(
        &grouped,
        &data.target,
        &grouped_col,
        &data.event_value,
        true,
    )?;

    warn_infinite(&regrouped.infinite_woe_categories());
    print_woe_table(&regrouped);
    print_info(&format!(
        "IV {:.4} → {:.4} after grouping",
        table.iv_total(),
        regrouped.iv_total()
    ));

    if let Some(output) = &data.output {
        save_step(5, &mut grouped, output)?;
    }

    Ok(())
}
