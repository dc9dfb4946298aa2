//! Category grouping of WoE tables
//!
//! Turns analyst-chosen groups of rows of a global WoE table into merged
//! category labels, and keeps the resulting mappings per feature.

use std::collections::{BTreeMap, HashMap};

use polars::prelude::*;

use super::column::{column_to_string_vec, require_column};
use super::binning::NA_BIN_LABEL;
use super::error::{WoeError, WoeResult};
use super::interval::{is_contiguous, is_interval_like, merge, render_bound, Interval};
use super::woe::{MISSING_CATEGORY, TOTAL_CATEGORY};

/// Raw category label -> merged label
pub type CategoryMapping = BTreeMap<String, String>;

/// Separator used when group labels are concatenated
const CONCAT_SEPARATOR: &str = " | ";

/// How the label of one group is built
#[derive(Debug, Clone, PartialEq)]
pub enum LabelStrategy {
    /// Numeric categories: `<=max`, `>=min` or `[min, max]` against the global range
    NumericOrdered { global_min: f64, global_max: f64 },
    /// Interval categories: merged when contiguous, concatenated otherwise
    IntervalMerge,
    /// Labels joined with `" | "` in group order
    Concat,
}

impl LabelStrategy {
    /// Build the label of one group of category labels
    pub fn label(&self, group: &[&str]) -> WoeResult<String> {
        match self {
            LabelStrategy::NumericOrdered {
                global_min,
                global_max,
            } => Ok(numeric_ordered_label(group, *global_min, *global_max)),
            LabelStrategy::IntervalMerge => {
                let intervals = group
                    .iter()
                    .map(|c| Interval::parse(c))
                    .collect::<WoeResult<Vec<Interval>>>()?;

                // A gap stays visible as a concatenated label
                match merge(&intervals) {
                    Some(merged) if is_contiguous(&intervals) => Ok(merged.to_string()),
                    _ => Ok(concat_label(group)),
                }
            }
            LabelStrategy::Concat => Ok(concat_label(group)),
        }
    }
}

fn concat_label(group: &[&str]) -> String {
    group.join(CONCAT_SEPARATOR)
}

/// Labels standing for missing values rather than a category of the feature
fn is_missing_label(label: &str) -> bool {
    label == MISSING_CATEGORY || label == NA_BIN_LABEL
}

/// Finite number parsed from a label; `inf` and `NaN` do not count
fn parse_number(label: &str) -> Option<f64> {
    label.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}

fn numeric_ordered_label(group: &[&str], global_min: f64, global_max: f64) -> String {
    let mut values: Vec<f64> = group.iter().filter_map(|c| parse_number(c)).collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let (min, max) = match (values.first(), values.last()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => return String::new(),
    };

    if min == global_min {
        format!("<={}", render_bound(max))
    } else if max == global_max {
        format!(">={}", render_bound(min))
    } else {
        format!("[{}, {}]", render_bound(min), render_bound(max))
    }
}

/// Numeric range of the categories when every one of them, missing labels
/// aside, parses as a finite number
fn numeric_domain(categories: &[String]) -> Option<(f64, f64)> {
    let values: Option<Vec<f64>> = categories
        .iter()
        .filter(|c| !is_missing_label(c))
        .map(|c| parse_number(c))
        .collect();
    let values = values?;

    let min = values.iter().copied().reduce(f64::min)?;
    let max = values.iter().copied().reduce(f64::max)?;
    Some((min, max))
}

/// Pick the labeling strategy of one group.
///
/// `domain` is the numeric range of all categories of the feature, if every
/// category is numeric. A group holding a missing-value label is always
/// concatenated.
pub fn classify_group(ordered: bool, domain: Option<(f64, f64)>, group: &[&str]) -> LabelStrategy {
    if !ordered || group.iter().any(|c| is_missing_label(c)) {
        return LabelStrategy::Concat;
    }

    if let Some((global_min, global_max)) = domain {
        return LabelStrategy::NumericOrdered {
            global_min,
            global_max,
        };
    }

    if group.iter().all(|c| is_interval_like(c)) {
        LabelStrategy::IntervalMerge
    } else {
        LabelStrategy::Concat
    }
}

/// Read category labels of a WoE table in row order, nulls and totals dropped
pub fn table_categories(table: &DataFrame, category_col: &str) -> WoeResult<Vec<String>> {
    let column = require_column(table, category_col)?;

    Ok(column_to_string_vec(column)?
        .into_iter()
        .flatten()
        .filter(|c| c != TOTAL_CATEGORY)
        .collect())
}

/// Build the category mapping of one feature without storing it.
///
/// Every category not referenced by a group maps to itself. Groups are not
/// checked for disjointness: a category listed in several groups takes the
/// label of the last one.
pub fn build_mapping(
    categories: &[String],
    groups: &[Vec<usize>],
    ordered: bool,
) -> WoeResult<CategoryMapping> {
    let domain = if ordered { numeric_domain(categories) } else { None };

    let mut mapping = CategoryMapping::new();

    for group in groups {
        let group_cats = group
            .iter()
            .map(|&i| {
                categories
                    .get(i)
                    .map(String::as_str)
                    .ok_or(WoeError::GroupIndexOutOfRange {
                        index: i,
                        len: categories.len(),
                    })
            })
            .collect::<WoeResult<Vec<&str>>>()?;

        let label = classify_group(ordered, domain, &group_cats).label(&group_cats)?;

        for cat in group_cats {
            mapping.insert(cat.to_string(), label.clone());
        }
    }

    for cat in categories {
        mapping
            .entry(cat.clone())
            .or_insert_with(|| cat.clone());
    }

    Ok(mapping)
}

/// Registry of category mappings, one per feature
///
/// Owned by the caller for the lifetime of a modeling session. Mappings are
/// only added or replaced, never removed.
#[derive(Debug, Clone, Default)]
pub struct CategoryMapper {
    mappings: HashMap<String, CategoryMapping>,
}

impl CategoryMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the mapping of `feature_name` from a global WoE table.
    ///
    /// # Arguments
    /// * `table` - Global WoE table (the totals row, if present, is ignored)
    /// * `feature_name` - Key the mapping is stored under
    /// * `category_col` - Column holding the category labels
    /// * `groups` - Row indices (into the totals-free category list) merged together
    /// * `ordered` - Build numeric / interval labels instead of concatenations
    ///
    /// Replaces any previous mapping of the feature. On error nothing is stored.
    pub fn create_map(
        &mut self,
        table: &DataFrame,
        feature_name: &str,
        category_col: &str,
        groups: &[Vec<usize>],
        ordered: bool,
    ) -> WoeResult<&CategoryMapping> {
        let categories = table_categories(table, category_col)?;
        let mapping = build_mapping(&categories, groups, ordered)?;

        self.mappings.insert(feature_name.to_string(), mapping);
        Ok(&self.mappings[feature_name])
    }

    /// Mapping of one feature
    pub fn get(&self, feature_name: &str) -> Option<&CategoryMapping> {
        self.mappings.get(feature_name)
    }

    /// Every stored mapping keyed by feature name
    pub fn get_all(&self) -> &HashMap<String, CategoryMapping> {
        &self.mappings
    }

    /// Store a caller-supplied mapping as is, replacing any existing one.
    ///
    /// No validation is performed: totality is the caller's responsibility.
    pub fn set(&mut self, feature_name: &str, mapping: CategoryMapping) {
        self.mappings.insert(feature_name.to_string(), mapping);
    }
}

/// Apply a category mapping to a raw feature column.
///
/// Returns a copy of `df` with `output_col` holding the mapped label of every
/// row. Values absent from the mapping keep their own label. Nulls take the
/// label of [`MISSING_CATEGORY`] when the mapping merges it into a group, and
/// stay null otherwise.
pub fn apply_mapping(
    df: &DataFrame,
    feature_col: &str,
    mapping: &CategoryMapping,
    output_col: &str,
) -> WoeResult<DataFrame> {
    let values = column_to_string_vec(require_column(df, feature_col)?)?;

    let mapped: Vec<Option<String>> = values
        .into_iter()
        .map(|v| match v {
            Some(s) => Some(mapping.get(&s).cloned().unwrap_or(s)),
            None => mapping
                .get(MISSING_CATEGORY)
                .filter(|label| label.as_str() != MISSING_CATEGORY)
                .cloned(),
        })
        .collect();

    let mut out = df.clone();
    out.with_column(Column::new(output_col.into(), mapped))?;
    Ok(out)
}
