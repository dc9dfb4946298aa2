//! CLI module - argument parsing and command runners

mod args;
mod run;

pub use args::{Cli, Commands, DataArgs, Groups};
pub use run::{run_group, run_periodic, run_table};
