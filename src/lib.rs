//! woetrack: Weight of Evidence library
//!
//! Computes WoE/IV tables of binned features, recomputes them per period to
//! check their stability, and merges categories into analyst-defined groups.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
