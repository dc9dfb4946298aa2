//! woetrack: Weight of Evidence CLI Tool
//!
//! Computes WoE/IV tables, tracks them across periods and applies
//! category groupings.

use anyhow::Result;
use clap::Parser;

use woetrack::cli::{run_group, run_periodic, run_table, Cli, Commands};
use woetrack::utils::{print_banner, print_completion};

fn main() -> Result<()> {
    let cli = Cli::parse();

    print_banner(env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Table { data, no_totals } => run_table(data, *no_totals)?,
        Commands::Periodic {
            data,
            date,
            granularity,
            drift_threshold,
        } => run_periodic(data, date, *granularity, *drift_threshold)?,
        Commands::Group {
            data,
            groups,
            ordered,
        } => run_group(data, &groups.0, *ordered)?,
    }

    print_completion();

    Ok(())
}
