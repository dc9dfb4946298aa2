//! Interval labels of binned numeric features
//!
//! Bin labels come in three shapes: `<=X` (unbounded below), `>=X` (unbounded
//! above) and `(A,B]` (bounded, left-open / right-closed). Labels are parsed
//! once into [`Interval`]; contiguity checks, merging and rendering all work
//! on the parsed endpoints, never on the text.

use std::fmt;

use super::error::{WoeError, WoeResult};

/// Substrings that mark a category label as interval-shaped
const INTERVAL_MARKERS: [&str; 8] = ["(", ")", "[", "]", "<=", ">=", "<", ">"];

/// A parsed interval label
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interval {
    /// `(-inf, x]`
    UnboundedBelow(f64),
    /// `[x, +inf)`
    UnboundedAbove(f64),
    /// `(lo, hi]`
    Bounded(f64, f64),
}

impl Interval {
    /// Parse a label such as `<=1`, `>= 5`, `> 40` or `(1, 3]`.
    ///
    /// Surrounding whitespace is ignored. `<X` and `>X` are read as the
    /// unbounded-below / unbounded-above shapes.
    pub fn parse(label: &str) -> WoeResult<Self> {
        let text = label.trim();

        if let Some(rest) = text.strip_prefix("<=").or_else(|| text.strip_prefix('<')) {
            return Ok(Interval::UnboundedBelow(parse_bound(label, rest)?));
        }
        if let Some(rest) = text.strip_prefix(">=").or_else(|| text.strip_prefix('>')) {
            return Ok(Interval::UnboundedAbove(parse_bound(label, rest)?));
        }

        let inner = text
            .strip_prefix(['(', '['])
            .and_then(|t| t.strip_suffix([')', ']']))
            .ok_or_else(|| WoeError::malformed(label, "expected '<=X', '>=X' or '(A,B]'"))?;

        let (left, right) = inner
            .split_once(',')
            .ok_or_else(|| WoeError::malformed(label, "missing ',' between bounds"))?;

        Ok(Interval::Bounded(parse_bound(label, left)?, parse_bound(label, right)?))
    }

    pub fn lower(&self) -> f64 {
        match self {
            Interval::UnboundedBelow(_) => f64::NEG_INFINITY,
            Interval::UnboundedAbove(x) => *x,
            Interval::Bounded(lo, _) => *lo,
        }
    }

    pub fn upper(&self) -> f64 {
        match self {
            Interval::UnboundedBelow(x) => *x,
            Interval::UnboundedAbove(_) => f64::INFINITY,
            Interval::Bounded(_, hi) => *hi,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::UnboundedBelow(x) => write!(f, "<={}", render_bound(*x)),
            Interval::UnboundedAbove(x) => write!(f, ">={}", render_bound(*x)),
            Interval::Bounded(lo, hi) => write!(f, "({},{}]", render_bound(*lo), render_bound(*hi)),
        }
    }
}

fn parse_bound(label: &str, text: &str) -> WoeResult<f64> {
    let text = text.trim();
    text.parse::<f64>()
        .map_err(|_| WoeError::malformed(label, format!("'{}' is not a number", text)))
}

/// Bounds render truncated to integer text; infinite bounds as `inf`/`-inf`
pub(crate) fn render_bound(x: f64) -> String {
    if x.is_finite() {
        // `+ 0.0` folds -0 into 0
        format!("{}", x.trunc() + 0.0)
    } else if x > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

/// Whether a category label looks like an interval
pub fn is_interval_like(label: &str) -> bool {
    INTERVAL_MARKERS.iter().any(|m| label.contains(m))
}

/// Sort by lower bound and check that each upper bound exactly equals the
/// next lower bound.
pub fn is_contiguous(intervals: &[Interval]) -> bool {
    let mut sorted = intervals.to_vec();
    sorted.sort_by(|a, b| a.lower().total_cmp(&b.lower()));

    sorted.windows(2).all(|w| w[0].upper() == w[1].lower())
}

/// Merge intervals into one, regardless of input order.
///
/// Only unbounded-below members gives `<=max(upper)`, only unbounded-above
/// members gives `>=min(lower)`; anything else is bounded by the smallest
/// lower and the largest upper bound. A group spanning both infinities
/// becomes `(-inf,inf]`.
pub fn merge(intervals: &[Interval]) -> Option<Interval> {
    let first = intervals.first()?;

    let has_minus_inf = intervals.iter().any(|i| matches!(i, Interval::UnboundedBelow(_)));
    let has_plus_inf = intervals.iter().any(|i| matches!(i, Interval::UnboundedAbove(_)));

    let min_lower = intervals
        .iter()
        .map(Interval::lower)
        .fold(first.lower(), f64::min);
    let max_upper = intervals
        .iter()
        .map(Interval::upper)
        .fold(first.upper(), f64::max);

    let merged = match (has_minus_inf, has_plus_inf) {
        (true, false) => Interval::UnboundedBelow(max_upper),
        (false, true) => Interval::UnboundedAbove(min_lower),
        _ => Interval::Bounded(min_lower, max_upper),
    };

    Some(merged)
}

/// Parse and merge interval labels, returning the merged label text
pub fn merge_labels<S: AsRef<str>>(labels: &[S]) -> WoeResult<Option<String>> {
    let intervals = labels
        .iter()
        .map(|l| Interval::parse(l.as_ref()))
        .collect::<WoeResult<Vec<Interval>>>()?;

    Ok(merge(&intervals).map(|i| i.to_string()))
}
