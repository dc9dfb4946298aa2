//! Binary target resolution
//!
//! Validates that a target column holds exactly two distinct values and turns
//! it into a per-row event mask for the configured event value.

use polars::prelude::*;

use super::column::{column_to_string_vec, distinct_up_to, require_column};
use super::error::{WoeError, WoeResult};

/// A third distinct value is enough to reject a target
const DISTINCT_SCAN_LIMIT: usize = 3;

/// Event value used when the caller does not pick one
pub const DEFAULT_EVENT_VALUE: &str = "1";

/// The two observed values of a binary target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryTarget {
    /// Value that counts as an event
    pub event_value: String,
    /// The other observed value
    pub non_event_value: String,
}

impl BinaryTarget {
    /// Resolve the binary target from per-row text values.
    ///
    /// Fails with [`WoeError::NonBinaryTarget`] unless exactly two distinct
    /// non-null values are present, and with [`WoeError::InvalidEventValue`]
    /// when `event_value` is not one of them.
    pub fn resolve(
        column: &str,
        values: &[Option<String>],
        event_value: &str,
    ) -> WoeResult<Self> {
        let distinct = distinct_up_to(values, DISTINCT_SCAN_LIMIT);

        if distinct.len() != 2 {
            return Err(WoeError::NonBinaryTarget {
                column: column.to_string(),
                values: distinct,
            });
        }

        let non_event_value = match distinct.iter().position(|v| v == event_value) {
            Some(0) => distinct[1].clone(),
            Some(_) => distinct[0].clone(),
            None => {
                return Err(WoeError::InvalidEventValue {
                    column: column.to_string(),
                    event_value: event_value.to_string(),
                    observed: distinct,
                })
            }
        };

        Ok(Self {
            event_value: event_value.to_string(),
            non_event_value,
        })
    }

    /// Per-row mask: `Some(true)` for events, `Some(false)` for non-events,
    /// `None` for null targets (excluded from every count).
    pub fn mask(&self, values: &[Option<String>]) -> Vec<Option<bool>> {
        values
            .iter()
            .map(|v| match v {
                Some(s) if s == &self.event_value => Some(true),
                Some(s) if s == &self.non_event_value => Some(false),
                _ => None,
            })
            .collect()
    }
}

/// Read the target column of `df` and resolve it against `event_value`.
///
/// Returns the resolved target together with its per-row event mask.
pub fn resolve_target_column(
    df: &DataFrame,
    target: &str,
    event_value: &str,
) -> WoeResult<(BinaryTarget, Vec<Option<bool>>)> {
    let column = require_column(df, target)?;
    let values = column_to_string_vec(column)?;
    let resolved = BinaryTarget::resolve(target, &values, event_value)?;
    let mask = resolved.mask(&values);
    Ok((resolved, mask))
}
