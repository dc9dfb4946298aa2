//! Error types for the WOE/IV engine.
//!
//! Every variant is a deterministic input-validation failure: callers can
//! match on the kind and recover (re-bin, pick another column, ...).
//! Infinite WOE/IV values are not errors and never show up here.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by the table engines and the category group builder.
#[derive(Debug, Error)]
pub enum WoeError {
    /// A named column is absent from the input table.
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    /// The target column does not hold exactly two distinct non-null values.
    ///
    /// `values` holds at most the first three distinct values seen.
    #[error("Target column '{column}' must be binary. Found {}: {values:?}", distinct_count(.values))]
    NonBinaryTarget { column: String, values: Vec<String> },

    /// The requested event value is not one of the observed target values.
    #[error("Event value '{event_value}' not found in target column '{column}'. Observed values: {observed:?}")]
    InvalidEventValue {
        column: String,
        event_value: String,
        observed: Vec<String>,
    },

    /// Bin edges must be finite, strictly increasing and non-empty.
    #[error("Invalid bin edges: {0}")]
    InvalidBinEdges(String),

    /// Binning needs a numeric column.
    #[error("Column '{column}' has type {dtype}, expected a numeric column")]
    NonNumericColumn { column: String, dtype: String },

    /// Every row of the date column is null after normalization.
    #[error("Date column '{0}' has no valid periods (all values are null)")]
    NoValidPeriods(String),

    /// A category looks like an interval but does not parse into numeric bounds.
    #[error("Malformed interval label '{label}': {reason}")]
    MalformedIntervalLabel { label: String, reason: String },

    /// A group references a row outside the category list.
    #[error("Group index {index} is out of range for {len} categories")]
    GroupIndexOutOfRange { index: usize, len: usize },

    /// Validation failed on the subset of one period.
    #[error("Period '{period}': {source}")]
    Period {
        period: String,
        #[source]
        source: Box<WoeError>,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl WoeError {
    pub(crate) fn malformed(label: &str, reason: impl Into<String>) -> Self {
        WoeError::MalformedIntervalLabel {
            label: label.to_string(),
            reason: reason.into(),
        }
    }
}

fn distinct_count(values: &[String]) -> String {
    match values.len() {
        n if n > 2 => format!("at least {} distinct values", n),
        n => format!("{} distinct value(s)", n),
    }
}

pub type WoeResult<T> = std::result::Result<T, WoeError>;
