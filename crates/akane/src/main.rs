//! Akane bot binary.
//!
//! This binary provides command-line access to the bot:
//! - Run the Discord bot serving paginated messages
//! - Print the resolved configuration

use clap::Parser;

mod cli;
mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, print_config, run_bot};

    // Pick up DISCORD_TOKEN and RUST_LOG from a local .env, if any
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    telemetry::init_logging(cli.verbose, cli.json_logs)?;

    match cli.command {
        Commands::Run { config } => {
            run_bot(config.as_deref()).await?;
        }

        Commands::Config { config } => {
            print_config(config.as_deref())?;
        }
    }

    Ok(())
}
