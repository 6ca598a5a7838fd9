//! Chat-platform identifiers.

use serde::{Deserialize, Serialize};

/// Identity of a chat user.
///
/// # Examples
///
/// ```
/// use akane_core::UserId;
///
/// let user = UserId::from(42);
/// assert_eq!(user.get(), 42);
/// assert_eq!(user.to_string(), "42");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct UserId(u64);

/// Identity of a channel a message lives in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct ChannelId(u64);

/// Identity of a sent message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct MessageId(u64);

impl UserId {
    /// Raw snowflake value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl ChannelId {
    /// Raw snowflake value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl MessageId {
    /// Raw snowflake value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Handle to a live message: the channel it was posted in plus its id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct MessageHandle {
    channel: ChannelId,
    message: MessageId,
}

impl MessageHandle {
    /// Creates a handle from its parts.
    pub fn new(channel: impl Into<ChannelId>, message: impl Into<MessageId>) -> Self {
        Self {
            channel: channel.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for MessageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.channel, self.message)
    }
}
