//! Pipeline module - WoE tables, periodic recomputation and category grouping

pub mod binning;
pub mod column;
pub mod error;
pub mod grouping;
pub mod interval;
pub mod loader;
pub mod periodic;
pub mod target;
pub mod woe;

pub use binning::{apply_bins, bin_column, NA_BIN_LABEL};
pub use error::{WoeError, WoeResult};
pub use grouping::{apply_mapping, CategoryMapper, CategoryMapping, LabelStrategy};
pub use interval::Interval;
pub use loader::*;
pub use periodic::{compute_periodic, PeriodGranularity, PeriodicWoeRow, PeriodicWoeTable};
pub use target::{BinaryTarget, DEFAULT_EVENT_VALUE};
pub use woe::{compute_mapping, compute_table, WoeRow, WoeTable, MISSING_CATEGORY, TOTAL_CATEGORY};
