//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{PeriodGranularity, DEFAULT_EVENT_VALUE};
use crate::report::stability::DEFAULT_DRIFT_THRESHOLD;

/// woetrack - Weight of Evidence tables, their stability over time, and category grouping
#[derive(Parser, Debug)]
#[command(name = "woetrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the WoE/IV table of one feature
    Table {
        #[command(flatten)]
        data: DataArgs,

        /// Do not append the __TOTAL__ row
        #[arg(long, default_value = "false")]
        no_totals: bool,
    },

    /// Recompute the WoE table per period and report its stability
    Periodic {
        #[command(flatten)]
        data: DataArgs,

        /// Date or period column
        #[arg(short, long)]
        date: String,

        /// Period granularity for date columns: day, month, quarter or year.
        /// Non-date columns are used verbatim as period keys.
        #[arg(long, default_value = "month")]
        granularity: PeriodGranularity,

        /// WoE spread across periods above which a category is flagged as drifting
        #[arg(long, default_value_t = DEFAULT_DRIFT_THRESHOLD, value_parser = validate_drift_threshold)]
        drift_threshold: f64,
    },

    /// Merge rows of the WoE table into groups and show the regrouped table
    Group {
        #[command(flatten)]
        data: DataArgs,

        /// Groups of WoE table row indices as JSON, e.g. '[[0,1],[4,5]]'.
        /// Row indices are shown in the first column of `woetrack table`.
        #[arg(short, long, value_parser = parse_groups)]
        groups: Groups,

        /// Build ordered labels (numeric ranges or merged intervals)
        /// instead of concatenating the category labels
        #[arg(long, default_value = "false")]
        ordered: bool,
    },
}

/// Arguments shared by every command
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Binary target column name
    #[arg(short, long)]
    pub target: String,

    /// Binned or categorical feature column name
    #[arg(short, long)]
    pub feature: String,

    /// Comma-separated ascending bin edges. When given, the numeric feature
    /// is binned into `<= e0`, `(e0, e1]`, ..., `> en` labels before any WoE
    /// computation; missing values get `N/A`.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub bins: Option<Vec<f64>>,

    /// Value in target column that represents EVENT.
    /// Numeric targets are matched on their value, so 1 also matches 1.0.
    #[arg(long, default_value = DEFAULT_EVENT_VALUE)]
    pub event_value: String,

    /// Output file path (CSV or Parquet, determined by extension).
    /// table/periodic write the WoE table; group writes the dataset with a
    /// `<feature>_grouped` column.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Higher values improve type detection for ambiguous columns but may be slower.
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Row-index groups parsed from `--groups`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groups(pub Vec<Vec<usize>>);

/// Validator for drift_threshold parameter
fn validate_drift_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value.is_nan() || value < 0.0 {
        Err(format!("drift_threshold must be >= 0.0, got {}", value))
    } else {
        Ok(value)
    }
}

/// Parser for the groups parameter
fn parse_groups(s: &str) -> Result<Groups, String> {
    let groups: Vec<Vec<usize>> = serde_json::from_str(s).map_err(|e| {
        format!(
            "'{}' is not a list of index lists (expected e.g. [[0,1],[4,5]]): {}",
            s, e
        )
    })?;

    if groups.iter().any(|g| g.is_empty()) {
        return Err("groups must not be empty".to_string());
    }

    Ok(Groups(groups))
}
