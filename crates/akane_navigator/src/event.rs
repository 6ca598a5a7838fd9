//! Inbound control events and their outcomes.

use akane_core::{MessageId, UserId};
use serde::{Deserialize, Serialize};

/// A control press delivered by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ControlEvent {
    actor: UserId,
    control: String,
    message: MessageId,
}

impl ControlEvent {
    /// Creates an event.
    pub fn new(
        actor: impl Into<UserId>,
        control: impl Into<String>,
        message: impl Into<MessageId>,
    ) -> Self {
        Self {
            actor: actor.into(),
            control: control.into(),
            message: message.into(),
        }
    }
}

/// What happened to an activation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Activation {
    /// State changed and the message was re-rendered
    #[display("updated")]
    Updated,
    /// Actor is not the owner; show them this notice privately
    #[display("rejected: {}", _0)]
    Rejected(String),
    /// Upstream fetch failed; show this notice, state unchanged
    #[display("failed: {}", _0)]
    Failed(String),
    /// Event refers to a finished session or an outdated render; ignored
    #[display("stale")]
    Stale,
    /// The activation ended the session
    #[display("terminated")]
    Terminated,
}

impl Activation {
    /// Notice to show the actor, if any.
    pub fn notice(&self) -> Option<&str> {
        match self {
            Activation::Rejected(notice) | Activation::Failed(notice) => Some(notice),
            _ => None,
        }
    }
}
