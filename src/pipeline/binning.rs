//! Bin-edge application for numeric features
//!
//! Turns an ascending list of cut points into interval labels that the WoE
//! engine can count and the grouping step can merge: `<= e0`, `(e0, e1]`,
//! ..., `> en`. Missing values (null or NaN) get [`NA_BIN_LABEL`].

use polars::prelude::*;

use super::column::require_column;
use super::error::{WoeError, WoeResult};

/// Label of rows whose value is null or NaN
pub const NA_BIN_LABEL: &str = "N/A";

/// Check that edges are non-empty, finite and strictly increasing
pub fn validate_edges(edges: &[f64]) -> WoeResult<()> {
    if edges.is_empty() {
        return Err(WoeError::InvalidBinEdges("at least one edge is required".to_string()));
    }

    if let Some(bad) = edges.iter().find(|e| !e.is_finite()) {
        return Err(WoeError::InvalidBinEdges(format!("edge {} is not finite", bad)));
    }

    if let Some(w) = edges.windows(2).find(|w| w[0] >= w[1]) {
        return Err(WoeError::InvalidBinEdges(format!(
            "edges must be strictly increasing, found {} followed by {}",
            w[0], w[1]
        )));
    }

    Ok(())
}

/// Label of the bin holding `value`. Edges must already be validated.
pub fn bin_label(value: f64, edges: &[f64]) -> String {
    if value.is_nan() {
        return NA_BIN_LABEL.to_string();
    }

    // Number of edges strictly below the value; bins are right-closed
    let idx = edges.partition_point(|&e| e < value);

    match idx {
        0 => format!("<= {}", edges[0]),
        i if i == edges.len() => format!("> {}", edges[i - 1]),
        i => format!("({}, {}]", edges[i - 1], edges[i]),
    }
}

/// Bin a numeric column of `df` into interval labels.
///
/// Returns a String column named `col` with one label per row. Fails with
/// [`WoeError::InvalidBinEdges`] for empty, non-finite or non-increasing
/// edges, and with [`WoeError::NonNumericColumn`] when `col` is not numeric.
pub fn bin_column(df: &DataFrame, col: &str, edges: &[f64]) -> WoeResult<Column> {
    validate_edges(edges)?;

    let column = require_column(df, col)?;
    if !column.dtype().is_primitive_numeric() {
        return Err(WoeError::NonNumericColumn {
            column: col.to_string(),
            dtype: column.dtype().to_string(),
        });
    }

    let values = column.cast(&DataType::Float64)?;
    let labels: Vec<String> = values
        .f64()?
        .into_iter()
        .map(|v| bin_label(v.unwrap_or(f64::NAN), edges))
        .collect();

    Ok(Column::new(col.into(), labels))
}

/// Bin `col` and store the labels in `output_col` of a copy of `df`
pub fn apply_bins(
    df: &DataFrame,
    col: &str,
    edges: &[f64],
    output_col: &str,
) -> WoeResult<DataFrame> {
    let mut binned = bin_column(df, col, edges)?;
    binned.rename(output_col.into());

    let mut out = df.clone();
    out.with_column(binned)?;
    Ok(out)
}
