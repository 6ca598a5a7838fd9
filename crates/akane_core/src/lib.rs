//! Core data types for Akane.
//!
//! This crate provides the display units ([`Page`], [`EmbedPage`]), the ordered
//! [`PageStore`] that backs a paginated message, the chat-platform identifiers
//! shared by every other crate, and the payload [`limits`] pages are checked
//! against before rendering.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ids;
pub mod limits;
mod page;
mod store;

pub use ids::{ChannelId, MessageHandle, MessageId, UserId};
pub use page::{EmbedField, EmbedPage, EmbedPageBuilder, Page};
pub use store::PageStore;
