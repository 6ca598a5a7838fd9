//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Akane - Discord bot serving interactive paginated messages
#[derive(Parser, Debug)]
#[command(name = "akane")]
#[command(about = "Discord bot serving interactive paginated messages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and serve paginated messages
    Run {
        /// Extra configuration file layered over the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the resolved configuration as TOML
    Config {
        /// Extra configuration file layered over the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
