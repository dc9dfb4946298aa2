//! Report module - terminal rendering of WoE tables, stability and mappings

pub mod mapping;
pub mod stability;
pub mod woe_table;

pub use mapping::*;
pub use stability::*;
pub use woe_table::*;
