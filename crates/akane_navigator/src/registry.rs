//! Routing of control events to live navigators.

use crate::{Activation, ControlEvent, Navigator};
use akane_core::MessageId;
use akane_error::NavigatorResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Live navigators keyed by the message they manage.
///
/// Navigators built with a registry insert themselves when started and remove
/// themselves on teardown, so the registry only ever holds active sessions.
/// Clones share the same map.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<MessageId, Navigator>>>,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.len())
            .finish()
    }
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, message: MessageId, navigator: Navigator) {
        let previous = self.sessions.write().insert(message, navigator);
        debug!(%message, replaced = previous.is_some(), "Registered navigator");
    }

    pub(crate) fn remove(&self, message: &MessageId) {
        if self.sessions.write().remove(message).is_some() {
            debug!(%message, "Unregistered navigator");
        }
    }

    /// Navigator managing `message`, if it is still active.
    pub fn get(&self, message: &MessageId) -> Option<Navigator> {
        self.sessions.read().get(message).cloned()
    }

    /// Whether `message` has an active navigator.
    pub fn contains(&self, message: &MessageId) -> bool {
        self.sessions.read().contains_key(message)
    }

    /// Number of active navigators.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether no navigator is active.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Route a control press to the navigator owning its message.
    ///
    /// Presses on messages without an active navigator are [`Activation::Stale`].
    #[instrument(skip(self), fields(message = %event.message(), actor = %event.actor()))]
    pub async fn dispatch(&self, event: &ControlEvent) -> NavigatorResult<Activation> {
        // Lock is released before awaiting the navigator
        let Some(navigator) = self.get(event.message()) else {
            debug!("No active navigator for message");
            return Ok(Activation::Stale);
        };
        navigator.activate(*event.actor(), event.control()).await
    }

    /// Close every active navigator, stripping their controls.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> usize {
        let navigators: Vec<Navigator> = self.sessions.read().values().cloned().collect();
        let mut closed = 0;
        for navigator in navigators {
            if navigator.close().await {
                closed += 1;
            }
        }
        info!(closed, "Closed active navigators");
        closed
    }
}
