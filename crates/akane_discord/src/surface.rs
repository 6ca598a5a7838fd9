//! `MessageSurface` implementation over the serenity HTTP client.

use crate::{DiscordError, render};
use akane_core::{ChannelId, MessageHandle};
use akane_error::NavigatorResult;
use akane_navigator::{MessageSurface, RenderedView};
use async_trait::async_trait;
use serenity::all::{self as discord, Http};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Sends, edits and deletes navigator messages through Discord's REST API.
///
/// Rate limiting and retries are handled by serenity's HTTP client; a call
/// that still fails is reported to the navigator as a surface error.
#[derive(Clone)]
pub struct SerenitySurface {
    http: Arc<Http>,
}

impl std::fmt::Debug for SerenitySurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerenitySurface").finish_non_exhaustive()
    }
}

impl SerenitySurface {
    /// Create a surface using the given HTTP client.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

fn channel_id(handle: &MessageHandle) -> discord::ChannelId {
    discord::ChannelId::new(handle.channel().get())
}

fn message_id(handle: &MessageHandle) -> discord::MessageId {
    discord::MessageId::new(handle.message().get())
}

#[async_trait]
impl MessageSurface for SerenitySurface {
    #[instrument(skip(self, view), fields(channel = %channel, generation = view.generation()))]
    async fn send(&self, channel: ChannelId, view: &RenderedView) -> NavigatorResult<MessageHandle> {
        let http: &Http = &self.http;
        let message = discord::ChannelId::new(channel.get())
            .send_message(http, render::create_message(view))
            .await
            .map_err(DiscordError::from)?;
        debug!(message_id = %message.id, "Sent navigator message");
        Ok(MessageHandle::new(channel, message.id.get()))
    }

    #[instrument(skip(self, view), fields(message = %handle, generation = view.generation()))]
    async fn edit(&self, handle: &MessageHandle, view: &RenderedView) -> NavigatorResult<()> {
        let http: &Http = &self.http;
        channel_id(handle)
            .edit_message(http, message_id(handle), render::edit_message(view))
            .await
            .map_err(DiscordError::from)?;
        Ok(())
    }

    #[instrument(skip(self), fields(message = %handle))]
    async fn strip_controls(&self, handle: &MessageHandle) -> NavigatorResult<()> {
        let http: &Http = &self.http;
        channel_id(handle)
            .edit_message(http, message_id(handle), render::strip_message())
            .await
            .map_err(DiscordError::from)?;
        Ok(())
    }

    #[instrument(skip(self), fields(message = %handle))]
    async fn delete(&self, handle: &MessageHandle) -> NavigatorResult<()> {
        let http: &Http = &self.http;
        channel_id(handle)
            .delete_message(http, message_id(handle))
            .await
            .map_err(DiscordError::from)?;
        Ok(())
    }
}
