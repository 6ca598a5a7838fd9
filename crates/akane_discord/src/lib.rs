//! Discord adapter for Akane.
//!
//! This crate connects [`akane_navigator`] to Discord through serenity:
//!
//! - **render**: converts a rendered view into embeds, content and button rows
//! - **surface**: [`SerenitySurface`], the `MessageSurface` over Discord's REST API
//! - **handler**: [`AkaneHandler`], acknowledging button presses and routing
//!   them to the navigator that owns the message
//! - **client**: [`AkaneBot`], the serenity client and its lifecycle

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod error;
mod handler;
pub mod render;
mod surface;

pub use client::{AkaneBot, ShutdownHandle};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::{AkaneHandler, PAGES_COMMAND, split_pages};
pub use surface::SerenitySurface;
