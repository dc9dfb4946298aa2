//! Weight of Evidence (WoE) and Information Value (IV) tables
//!
//! Computes per-category event rate, non-event rate, exposure, WoE and IV for
//! an already-binned feature against a binary target.
//!
//! No smoothing is applied: a category holding only one class gets an
//! infinite WoE (`+inf` when it has no non-events, `-inf` when it has no
//! events) and an infinite IV. Callers treat that as a re-binning signal.

use std::collections::HashMap;

use polars::prelude::*;

use super::column::{column_to_string_vec, require_column};
use super::error::WoeResult;
use super::target::resolve_target_column;

/// Category label of the synthetic totals row
pub const TOTAL_CATEGORY: &str = "__TOTAL__";

/// Category label given to rows whose feature value is null
pub const MISSING_CATEGORY: &str = "__MISSING__";

/// WoE statistics for a single category
#[derive(Debug, Clone, PartialEq)]
pub struct WoeRow {
    /// Category label (or [`TOTAL_CATEGORY`])
    pub category: String,
    /// Rows in this category whose target equals the event value
    pub n_events: u64,
    /// Rows in this category whose target is the other value
    pub n_non_events: u64,
    /// Share of all events falling in this category
    pub event_rate: f64,
    /// Share of all non-events falling in this category
    pub non_event_rate: f64,
    /// Share of all rows falling in this category
    pub exposure: f64,
    /// ln(event_rate / non_event_rate), may be infinite
    pub woe: f64,
    /// (event_rate - non_event_rate) * woe, may be +inf
    pub iv: f64,
    /// Sum of every category's IV, replicated on each row
    pub iv_total: f64,
}

impl WoeRow {
    pub fn is_total(&self) -> bool {
        self.category == TOTAL_CATEGORY
    }
}

/// WoE table of one feature, rows in first-seen category order
#[derive(Debug, Clone, PartialEq)]
pub struct WoeTable {
    /// Name of the feature column the table was computed on
    pub feature: String,
    pub rows: Vec<WoeRow>,
}

impl WoeTable {
    /// Rows excluding the totals row
    pub fn category_rows(&self) -> impl Iterator<Item = &WoeRow> {
        self.rows.iter().filter(|r| !r.is_total())
    }

    pub fn totals(&self) -> Option<&WoeRow> {
        self.rows.iter().find(|r| r.is_total())
    }

    pub fn get(&self, category: &str) -> Option<&WoeRow> {
        self.category_rows().find(|r| r.category == category)
    }

    /// Total IV of the feature (0.0 for an empty table)
    pub fn iv_total(&self) -> f64 {
        self.rows.first().map(|r| r.iv_total).unwrap_or(0.0)
    }

    /// Categories whose WoE is infinite (candidates for re-binning)
    pub fn infinite_woe_categories(&self) -> Vec<&str> {
        self.category_rows()
            .filter(|r| r.woe.is_infinite())
            .map(|r| r.category.as_str())
            .collect()
    }

    /// Category -> WoE lookup, totals row excluded
    pub fn woe_map(&self) -> HashMap<String, f64> {
        self.category_rows()
            .map(|r| (r.category.clone(), r.woe))
            .collect()
    }

    /// Convert to a DataFrame whose category column is named after the feature
    pub fn to_dataframe(&self) -> WoeResult<DataFrame> {
        rows_to_dataframe(&self.feature, &self.rows, None)
    }
}

/// Build a DataFrame from WoE rows, optionally prefixed with a period column
pub(crate) fn rows_to_dataframe(
    category_col: &str,
    rows: &[WoeRow],
    periods: Option<Vec<String>>,
) -> WoeResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(10);

    if let Some(periods) = periods {
        columns.push(Column::new("period".into(), periods));
    }

    columns.push(Column::new(
        category_col.into(),
        rows.iter().map(|r| r.category.clone()).collect::<Vec<String>>(),
    ));
    columns.push(Column::new(
        "n_events".into(),
        rows.iter().map(|r| r.n_events).collect::<Vec<u64>>(),
    ));
    columns.push(Column::new(
        "n_non_events".into(),
        rows.iter().map(|r| r.n_non_events).collect::<Vec<u64>>(),
    ));

    let float_columns: [(&str, fn(&WoeRow) -> f64); 6] = [
        ("event_rate", |r| r.event_rate),
        ("non_event_rate", |r| r.non_event_rate),
        ("exposure", |r| r.exposure),
        ("woe", |r| r.woe),
        ("iv", |r| r.iv),
        ("iv_total", |r| r.iv_total),
    ];
    for (name, field) in float_columns {
        columns.push(Column::new(
            name.into(),
            rows.iter().map(field).collect::<Vec<f64>>(),
        ));
    }

    Ok(DataFrame::new(columns)?)
}

/// Calculate WoE and IV contribution from category rates
///
/// WoE = ln(event_rate / non_event_rate)
/// IV  = (event_rate - non_event_rate) * WoE
///
/// A zero rate yields an infinite WoE and, since the rate difference is then
/// nonzero, an IV of `+inf`.
pub(crate) fn calculate_woe_iv(event_rate: f64, non_event_rate: f64) -> (f64, f64) {
    let woe = if non_event_rate == 0.0 {
        f64::INFINITY
    } else if event_rate == 0.0 {
        f64::NEG_INFINITY
    } else {
        (event_rate / non_event_rate).ln()
    };

    let diff = event_rate - non_event_rate;
    let iv = if woe.is_infinite() {
        if diff == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        diff * woe
    };

    (woe, iv)
}

/// Compute WoE rows from (category, is_event) observations.
///
/// Null categories are counted under [`MISSING_CATEGORY`]. Callers must have
/// validated that both classes are present, so both denominators are nonzero.
pub(crate) fn compute_rows<'a, I>(observations: I, add_totals: bool) -> Vec<WoeRow>
where
    I: IntoIterator<Item = (Option<&'a str>, bool)>,
{
    let mut order: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(u64, u64)> = Vec::new();

    for (category, is_event) in observations {
        let label = category.unwrap_or(MISSING_CATEGORY);
        let slot = match index.get(label) {
            Some(&i) => i,
            None => {
                order.push(label.to_string());
                counts.push((0, 0));
                index.insert(label.to_string(), counts.len() - 1);
                counts.len() - 1
            }
        };
        if is_event {
            counts[slot].0 += 1;
        } else {
            counts[slot].1 += 1;
        }
    }

    let total_events: u64 = counts.iter().map(|(e, _)| e).sum();
    let total_non_events: u64 = counts.iter().map(|(_, n)| n).sum();
    let total_rows = (total_events + total_non_events) as f64;

    let mut rows: Vec<WoeRow> = order
        .into_iter()
        .zip(counts)
        .map(|(category, (n_events, n_non_events))| {
            let event_rate = n_events as f64 / total_events as f64;
            let non_event_rate = n_non_events as f64 / total_non_events as f64;
            let (woe, iv) = calculate_woe_iv(event_rate, non_event_rate);

            WoeRow {
                category,
                n_events,
                n_non_events,
                event_rate,
                non_event_rate,
                exposure: (n_events + n_non_events) as f64 / total_rows,
                woe,
                iv,
                iv_total: 0.0,
            }
        })
        .collect();

    // inf + finite stays inf, so one infinite category makes the total infinite
    let iv_total: f64 = rows.iter().map(|r| r.iv).sum();

    if add_totals {
        rows.push(WoeRow {
            category: TOTAL_CATEGORY.to_string(),
            n_events: total_events,
            n_non_events: total_non_events,
            event_rate: f64::NAN,
            non_event_rate: f64::NAN,
            exposure: f64::NAN,
            woe: f64::NAN,
            iv: iv_total,
            iv_total,
        });
    }

    for row in &mut rows {
        row.iv_total = iv_total;
    }

    rows
}

/// Extract per-row feature labels and target mask after validating both columns
fn prepare(
    df: &DataFrame,
    target_col: &str,
    feature_col: &str,
    event_value: &str,
) -> WoeResult<(Vec<Option<String>>, Vec<Option<bool>>)> {
    require_column(df, target_col)?;
    let feature = require_column(df, feature_col)?;

    let (_, mask) = resolve_target_column(df, target_col, event_value)?;
    let labels = column_to_string_vec(feature)?;

    Ok((labels, mask))
}

fn observations<'a>(
    labels: &'a [Option<String>],
    mask: &'a [Option<bool>],
) -> impl Iterator<Item = (Option<&'a str>, bool)> + 'a {
    labels
        .iter()
        .zip(mask.iter())
        .filter_map(|(label, is_event)| is_event.map(|e| (label.as_deref(), e)))
}

/// Compute the WoE/IV table of `feature_col` against `target_col`.
///
/// # Arguments
/// * `df` - Input table
/// * `target_col` - Binary target column (exactly two distinct non-null values)
/// * `feature_col` - Already-binned / categorical feature column
/// * `event_value` - Target value counted as an event (canonical text form, e.g. `"1"`)
/// * `add_totals` - Append a [`TOTAL_CATEGORY`] row carrying the summed IV
///
/// # Errors
/// `MissingColumn`, `NonBinaryTarget` or `InvalidEventValue`; no partial table
/// is ever returned.
pub fn compute_table(
    df: &DataFrame,
    target_col: &str,
    feature_col: &str,
    event_value: &str,
    add_totals: bool,
) -> WoeResult<WoeTable> {
    let (labels, mask) = prepare(df, target_col, feature_col, event_value)?;
    let rows = compute_rows(observations(&labels, &mask), add_totals);

    Ok(WoeTable {
        feature: feature_col.to_string(),
        rows,
    })
}

/// Compute only the category -> WoE mapping (no totals, no rates).
///
/// Numerically identical to the `woe` column of
/// `compute_table(.., add_totals = false)`.
pub fn compute_mapping(
    df: &DataFrame,
    target_col: &str,
    feature_col: &str,
    event_value: &str,
) -> WoeResult<HashMap<String, f64>> {
    let (labels, mask) = prepare(df, target_col, feature_col, event_value)?;

    Ok(compute_rows(observations(&labels, &mask), false)
        .into_iter()
        .map(|r| (r.category, r.woe))
        .collect())
}
