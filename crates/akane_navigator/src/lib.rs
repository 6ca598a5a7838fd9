//! Interactive paginated messages.
//!
//! A [`Navigator`] ties an ordered [`PageStore`](akane_core::PageStore) and a
//! [`ControlSet`] to one owner, one live message and one timeout. Button
//! presses arrive as [`ControlEvent`]s, are routed by the [`SessionRegistry`]
//! to the navigator owning the message, and each accepted press becomes a
//! small transition value applied under the session lock.
//!
//! # Lifecycle
//!
//! - `ACTIVE`: entered once the first render is sent and the message handle
//!   is bound ([`Navigator::start`] or [`Navigator::bind`])
//! - `TERMINATED`: entered on Kill (message deleted), timeout or
//!   [`Navigator::close`] (controls stripped); every later event is a no-op
//!
//! # Example
//!
//! ```rust,ignore
//! use akane_navigator::{ControlSet, Navigator, SessionRegistry};
//!
//! let navigator = Navigator::builder()
//!     .owner(user_id)
//!     .pages(pages)
//!     .controls(ControlSet::paginated())
//!     .surface(surface)
//!     .cache(cache)
//!     .registry(registry.clone())
//!     .build()?;
//! navigator.start(channel_id).await?;
//!
//! // later, from the platform event loop
//! registry.dispatch(&event).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod control;
mod event;
mod navigator;
mod preview;
mod registry;
mod state;
mod surface;
mod view;

pub use config::{AkaneConfig, NavigatorConfig, NavigatorConfigBuilder, TimeoutPolicy};
pub use control::{Control, ControlId, ControlKind, ControlSet, ControlStyle, Face, SwapSide};
pub use event::{Activation, ControlEvent};
pub use navigator::{Navigator, NavigatorBuilder, NavigatorSnapshot};
pub use state::SessionStatus;
pub use preview::{FnPreviewSource, PreviewSource, preview_fn};
pub use registry::SessionRegistry;
pub use surface::MessageSurface;
pub use view::{ControlTarget, RenderedControl, RenderedView};

/// Cache of fetched preview stores keyed by the message that owns them.
pub type PreviewStoreCache = akane_cache::PreviewCache<akane_core::MessageId, akane_core::PageStore>;
