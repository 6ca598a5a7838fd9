//! Discord bot client setup and lifecycle management.

use crate::{AkaneHandler, DiscordError, DiscordErrorKind, DiscordResult};
use akane_navigator::{AkaneConfig, SessionRegistry};
use serenity::Client;
use serenity::gateway::ShardManager;
use std::sync::Arc;
use tracing::{info, instrument};

/// Main Discord bot client for Akane.
///
/// # Example
/// ```no_run
/// use akane_discord::AkaneBot;
/// use akane_navigator::AkaneConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let mut bot = AkaneBot::new(token, AkaneConfig::load()?).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct AkaneBot {
    client: Client,
    registry: SessionRegistry,
}

impl AkaneBot {
    /// Create a new bot instance.
    ///
    /// # Errors
    /// Returns an error if the Serenity client fails to initialize.
    #[instrument(skip(token, config), fields(token_len = token.len()))]
    pub async fn new(token: String, config: AkaneConfig) -> DiscordResult<Self> {
        info!("Initializing Akane Discord bot");

        let handler = AkaneHandler::new(config);
        let registry = handler.registry().clone();
        let intents = AkaneHandler::intents();

        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        info!("Serenity client built successfully");

        Ok(Self { client, registry })
    }

    /// Registry of live navigators.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Start the bot. Blocks until the client stops.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or encounters a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> DiscordResult<()> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;

        Ok(())
    }

    /// Handle that stops the bot from another task while [`AkaneBot::start`] runs.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            registry: self.registry.clone(),
            shards: Arc::clone(&self.client.shard_manager),
        }
    }
}

/// Stops a running [`AkaneBot`].
#[derive(Clone)]
pub struct ShutdownHandle {
    registry: SessionRegistry,
    shards: Arc<ShardManager>,
}

impl ShutdownHandle {
    /// Close every live navigator, then disconnect from the gateway.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        let closed = self.registry.shutdown().await;
        info!(closed, "Shutting down Discord bot");
        self.shards.shutdown_all().await;
    }
}
