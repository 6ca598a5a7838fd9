//! CLI command definitions and handlers.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{print_config, run_bot};
