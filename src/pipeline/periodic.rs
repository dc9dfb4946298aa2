//! Time-sliced WoE computation
//!
//! Repeats the WoE table computation on each period derived from a date
//! column. A category whose WoE differs between periods is the drift signal
//! used to check that a global grouping stays stable over time.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate};
use polars::prelude::*;
use rayon::prelude::*;

use super::column::{column_to_string_vec, require_column};
use super::error::{WoeError, WoeResult};
use super::target::BinaryTarget;
use super::woe::{compute_rows, rows_to_dataframe, WoeRow};

/// Days between 0001-01-01 (day 1 of the common era) and 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Granularity used to turn date/time values into period keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PeriodGranularity {
    /// `2024-01-15`
    Day,
    /// `2024-01`
    #[default]
    Month,
    /// `2024-Q1`
    Quarter,
    /// `2024`
    Year,
}

impl PeriodGranularity {
    /// Render a date as a period key
    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            PeriodGranularity::Day => date.format("%Y-%m-%d").to_string(),
            PeriodGranularity::Month => date.format("%Y-%m").to_string(),
            PeriodGranularity::Quarter => format!("{}-Q{}", date.year(), date.month0() / 3 + 1),
            PeriodGranularity::Year => date.format("%Y").to_string(),
        }
    }
}

impl std::fmt::Display for PeriodGranularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodGranularity::Day => write!(f, "day"),
            PeriodGranularity::Month => write!(f, "month"),
            PeriodGranularity::Quarter => write!(f, "quarter"),
            PeriodGranularity::Year => write!(f, "year"),
        }
    }
}

impl std::str::FromStr for PeriodGranularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(PeriodGranularity::Day),
            "month" => Ok(PeriodGranularity::Month),
            "quarter" => Ok(PeriodGranularity::Quarter),
            "year" => Ok(PeriodGranularity::Year),
            _ => Err(format!(
                "Unknown period granularity: '{}'. Use 'day', 'month', 'quarter' or 'year'.",
                s
            )),
        }
    }
}

/// A WoE row tagged with its period key
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicWoeRow {
    pub period: String,
    pub row: WoeRow,
}

/// WoE rows of every period, ordered by period key then first-seen category
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicWoeTable {
    pub feature: String,
    pub rows: Vec<PeriodicWoeRow>,
    /// Rows skipped because their period key was null
    pub skipped_rows: usize,
}

impl PeriodicWoeTable {
    /// Distinct period keys in table order
    pub fn periods(&self) -> Vec<&str> {
        let mut periods: Vec<&str> = Vec::new();
        for r in &self.rows {
            if periods.last() != Some(&r.period.as_str()) {
                periods.push(r.period.as_str());
            }
        }
        periods
    }

    /// Rows of one period
    pub fn period_rows<'a>(&'a self, period: &'a str) -> impl Iterator<Item = &'a WoeRow> + 'a {
        self.rows
            .iter()
            .filter(move |r| r.period == period)
            .map(|r| &r.row)
    }

    /// Convert to a DataFrame with a leading `period` column
    pub fn to_dataframe(&self) -> WoeResult<DataFrame> {
        let periods: Vec<String> = self.rows.iter().map(|r| r.period.clone()).collect();
        let rows: Vec<WoeRow> = self.rows.iter().map(|r| r.row.clone()).collect();
        rows_to_dataframe(&self.feature, &rows, Some(periods))
    }
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

fn date_from_timestamp(value: i64, unit: TimeUnit) -> Option<NaiveDate> {
    let per_second: i64 = match unit {
        TimeUnit::Nanoseconds => 1_000_000_000,
        TimeUnit::Microseconds => 1_000_000,
        TimeUnit::Milliseconds => 1_000,
    };
    let secs = value.div_euclid(per_second);
    let nanos = value.rem_euclid(per_second) * (1_000_000_000 / per_second);

    DateTime::from_timestamp(secs, nanos as u32).map(|dt| dt.date_naive())
}

/// Derive one period key per row.
///
/// `Date` and `Datetime` values are normalized with `granularity` (timestamps
/// are read as UTC); any other column type is used verbatim as a discrete
/// label. Null or unrepresentable values give `None`.
pub fn derive_period_keys(
    col: &Column,
    granularity: PeriodGranularity,
) -> WoeResult<Vec<Option<String>>> {
    let keys = match col.dtype() {
        DataType::Date => {
            let days = col.cast(&DataType::Int32)?;
            days.i32()?
                .into_iter()
                .map(|d| d.and_then(date_from_epoch_days).map(|date| granularity.format(date)))
                .collect()
        }
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let stamps = col.cast(&DataType::Int64)?;
            stamps
                .i64()?
                .into_iter()
                .map(|t| {
                    t.and_then(|t| date_from_timestamp(t, unit))
                        .map(|date| granularity.format(date))
                })
                .collect()
        }
        _ => column_to_string_vec(col)?,
    };

    Ok(keys)
}

/// Compute the WoE table of `feature_col` separately for each period of `date_col`.
///
/// Each period is validated on its own subset exactly like
/// [`compute_table`](super::woe::compute_table) (no totals row). Periods are
/// returned in ascending key order.
///
/// # Errors
/// * `MissingColumn` for an absent target, feature or date column
/// * `NoValidPeriods` when every period key is null
/// * `Period` wrapping the validation failure of a single period
pub fn compute_periodic(
    df: &DataFrame,
    target_col: &str,
    feature_col: &str,
    date_col: &str,
    event_value: &str,
    granularity: PeriodGranularity,
) -> WoeResult<PeriodicWoeTable> {
    let target = require_column(df, target_col)?;
    let feature = require_column(df, feature_col)?;
    let date = require_column(df, date_col)?;

    let keys = derive_period_keys(date, granularity)?;
    if keys.iter().all(|k| k.is_none()) {
        return Err(WoeError::NoValidPeriods(date_col.to_string()));
    }

    let labels = column_to_string_vec(feature)?;
    let targets = column_to_string_vec(target)?;

    let mut partitions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    let mut skipped_rows = 0usize;
    for (i, key) in keys.iter().enumerate() {
        match key {
            Some(k) => partitions.entry(k.as_str()).or_default().push(i),
            None => skipped_rows += 1,
        }
    }

    // Periods are independent; results come back in ascending period order
    let per_period: Vec<WoeResult<Vec<PeriodicWoeRow>>> = partitions
        .into_iter()
        .collect::<Vec<_>>()
        .par_iter()
        .map(|(period, indices)| -> WoeResult<Vec<PeriodicWoeRow>> {
            let subset_targets: Vec<Option<String>> =
                indices.iter().map(|&i| targets[i].clone()).collect();

            let resolved = BinaryTarget::resolve(target_col, &subset_targets, event_value)
                .map_err(|e| WoeError::Period {
                    period: period.to_string(),
                    source: Box::new(e),
                })?;
            let mask = resolved.mask(&subset_targets);

            let observations = indices
                .iter()
                .zip(mask)
                .filter_map(|(&i, is_event)| is_event.map(|e| (labels[i].as_deref(), e)));

            Ok(compute_rows(observations, false)
                .into_iter()
                .map(|row| PeriodicWoeRow {
                    period: period.to_string(),
                    row,
                })
                .collect())
        })
        .collect();

    let mut rows: Vec<PeriodicWoeRow> = Vec::new();
    for period_rows in per_period {
        rows.extend(period_rows?);
    }

    Ok(PeriodicWoeTable {
        feature: feature_col.to_string(),
        rows,
        skipped_rows,
    })
}
