//! Serenity event handler routing button presses to navigators.

use crate::{DiscordError, DiscordResult, SerenitySurface, render};
use akane_core::{ChannelId, Page, PageStore};
use akane_navigator::{AkaneConfig, ControlEvent, Navigator, PreviewStoreCache, SessionRegistry};
use serenity::all::{
    Command, CommandInteraction, CommandOptionType, ComponentInteraction, CreateCommand,
    CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseMessage, Interaction,
    Ready,
};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::gateway::GatewayIntents;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Name of the demonstration slash command.
pub const PAGES_COMMAND: &str = "pages";

/// Separator between pages in the `/pages` command input.
const PAGE_SEPARATOR: char = '|';

/// Event handler for the Akane Discord bot.
///
/// Owns the session registry and the shared preview cache. Component
/// interactions are acknowledged, turned into [`ControlEvent`]s and routed to
/// the navigator owning the pressed message.
pub struct AkaneHandler {
    config: AkaneConfig,
    registry: SessionRegistry,
    cache: PreviewStoreCache,
}

impl AkaneHandler {
    /// Create a handler with the given configuration.
    pub fn new(config: AkaneConfig) -> Self {
        let cache = PreviewStoreCache::new(config.cache.clone());
        Self {
            config,
            registry: SessionRegistry::new(),
            cache,
        }
    }

    /// Required gateway intents for the bot.
    ///
    /// Interactions arrive regardless of intents; guild access is enough.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
    }

    /// Registry of live navigators, shared with the bot for shutdown.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// The `/pages` command definition.
    pub fn pages_command() -> CreateCommand {
        CreateCommand::new(PAGES_COMMAND)
            .description("Show text as a paginated message")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "text",
                    "Pages separated by |",
                )
                .required(true),
            )
    }

    #[instrument(
        skip(self, ctx, component),
        fields(
            message_id = %component.message.id,
            actor = %component.user.id,
            custom_id = %component.data.custom_id
        )
    )]
    async fn handle_component(&self, ctx: &Context, component: &ComponentInteraction) {
        // Acknowledge first; the navigator edits the message itself
        if let Err(e) = component
            .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
            .await
        {
            warn!(error = %e, "Failed to acknowledge component interaction");
        }

        let event = ControlEvent::new(
            component.user.id.get(),
            component.data.custom_id.clone(),
            component.message.id.get(),
        );
        let activation = match self.registry.dispatch(&event).await {
            Ok(activation) => activation,
            Err(e) => {
                error!(error = %e, "Activation failed");
                return;
            }
        };
        debug!(%activation, "Activation handled");

        if let Some(followup) = render::notice_followup(&activation) {
            if let Err(e) = component.create_followup(&ctx.http, followup).await {
                warn!(error = %e, "Failed to send notice");
            }
        }
    }

    #[instrument(skip(self, ctx, command), fields(user = %command.user.id, channel = %command.channel_id))]
    async fn handle_pages(&self, ctx: &Context, command: &CommandInteraction) -> DiscordResult<()> {
        let text = command
            .data
            .options
            .iter()
            .find(|option| option.name == "text")
            .and_then(|option| option.value.as_str())
            .unwrap_or_default();
        let pages = split_pages(text);

        if pages.is_empty() {
            let reply = CreateInteractionResponseMessage::new()
                .content("Give me at least one page of text.")
                .ephemeral(true);
            command
                .create_response(&ctx.http, CreateInteractionResponse::Message(reply))
                .await?;
            return Ok(());
        }

        let reply = CreateInteractionResponseMessage::new()
            .content(format!("Showing {} page(s).", pages.len()))
            .ephemeral(true);
        command
            .create_response(&ctx.http, CreateInteractionResponse::Message(reply))
            .await?;

        let surface = Arc::new(SerenitySurface::new(ctx.http.clone()));
        let navigator = Navigator::builder()
            .owner(command.user.id.get())
            .pages(pages)
            .config(self.config.navigator.clone())
            .surface(surface)
            .cache(self.cache.clone())
            .registry(self.registry.clone())
            .build()
            .map_err(to_interaction_error)?;
        navigator
            .start(ChannelId::from(command.channel_id.get()))
            .await
            .map_err(to_interaction_error)?;
        Ok(())
    }
}

fn to_interaction_error(err: akane_error::NavigatorError) -> DiscordError {
    DiscordError::new(crate::DiscordErrorKind::InteractionFailed(err.to_string()))
}

/// Split `/pages` input into text pages, dropping blank segments.
pub fn split_pages(text: &str) -> PageStore {
    text.split(PAGE_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(Page::from)
        .collect()
}

#[async_trait]
impl EventHandler for AkaneHandler {
    /// Called when the bot successfully connects to Discord.
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "Bot connected to Discord"
        );

        match Command::create_global_command(&ctx.http, Self::pages_command()).await {
            Ok(command) => info!(command = %command.name, "Registered slash command"),
            Err(e) => error!(error = %e, "Failed to register slash command"),
        }
    }

    /// Called for slash commands and button presses.
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Component(component) => self.handle_component(&ctx, &component).await,
            Interaction::Command(command) if command.data.name == PAGES_COMMAND => {
                if let Err(e) = self.handle_pages(&ctx, &command).await {
                    error!(error = %e, "Failed to start navigator");
                }
            }
            _ => debug!("Ignoring unsupported interaction"),
        }
    }
}
