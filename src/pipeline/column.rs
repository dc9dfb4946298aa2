//! Column access helpers shared by the table engines
//!
//! Every engine works on per-row text labels: category values, target values
//! and period keys are all compared on their canonical string form so that
//! `1`, `1.0` and `"1"` agree.

use std::collections::HashSet;

use polars::prelude::*;

use super::error::{WoeError, WoeResult};

/// Look up a column, mapping absence to [`WoeError::MissingColumn`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> WoeResult<&'a Column> {
    df.column(name)
        .map_err(|_| WoeError::MissingColumn(name.to_string()))
}

/// Convert a column to a Vec of Option<String>, one entry per row
///
/// Floats use Rust's shortest round-trip formatting, so whole numbers render
/// without a fractional part (`10.0` becomes `"10"`).
pub fn column_to_string_vec(col: &Column) -> WoeResult<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                // NaN is a missing value, not a category
                .map(|v| v.filter(|n| !n.is_nan()).map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}

/// Distinct non-null values in first-seen order, scanning stops once
/// `limit` of them are found
pub fn distinct_up_to(values: &[Option<String>], limit: usize) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut distinct = Vec::new();

    for v in values.iter().flatten() {
        if distinct.len() == limit {
            break;
        }
        if seen.insert(v.as_str()) {
            distinct.push(v.clone());
        }
    }
    distinct
}
