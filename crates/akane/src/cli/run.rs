//! Command handlers.

use akane_discord::{AkaneBot, DiscordError, DiscordErrorKind};
use akane_navigator::AkaneConfig;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Connect to Discord and serve until Ctrl+C or a fatal client error.
#[instrument(skip_all, fields(config = ?config.map(Path::display)))]
pub async fn run_bot(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AkaneConfig::load_with(config)?;
    info!(
        timeout_secs = config.navigator.timeout_secs(),
        timeout_policy = %config.navigator.timeout_policy(),
        cache_size = config.cache.max_size(),
        "Configuration loaded"
    );

    let token = std::env::var("DISCORD_TOKEN").map_err(|_| {
        DiscordError::new(DiscordErrorKind::ConfigurationError(
            "DISCORD_TOKEN environment variable not set".to_string(),
        ))
    })?;

    let mut bot = AkaneBot::new(token, config).await?;
    let shutdown = bot.shutdown_handle();

    tokio::select! {
        result = bot.start() => result?,
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!(error = %e, "Failed to listen for Ctrl+C");
            }
            info!("Received Ctrl+C");
            shutdown.shutdown().await;
        }
    }

    Ok(())
}

/// Print the configuration the bot would run with.
pub fn print_config(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AkaneConfig::load_with(config)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
