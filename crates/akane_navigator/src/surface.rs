//! Outbound seam to the chat platform.

use crate::RenderedView;
use akane_core::{ChannelId, MessageHandle};
use akane_error::NavigatorResult;
use async_trait::async_trait;

/// Operations a navigator needs from the chat platform.
///
/// The navigator is the sole caller for the messages it owns. Retries are
/// the platform client's business; a failed call is reported once and the
/// navigator keeps its pre-call state.
#[async_trait]
pub trait MessageSurface: Send + Sync {
    /// Post a new message and return its handle.
    async fn send(&self, channel: ChannelId, view: &RenderedView) -> NavigatorResult<MessageHandle>;

    /// Replace the page and controls of an existing message.
    async fn edit(&self, message: &MessageHandle, view: &RenderedView) -> NavigatorResult<()>;

    /// Remove every control, leaving the content in place.
    async fn strip_controls(&self, message: &MessageHandle) -> NavigatorResult<()>;

    /// Delete the message.
    async fn delete(&self, message: &MessageHandle) -> NavigatorResult<()>;
}
