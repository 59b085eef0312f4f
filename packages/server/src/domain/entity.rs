//! Entities for the broadcast domain.

use super::{DisplayName, MessageContent, Timestamp};

/// A chat message transmitted between peers.
///
/// `received` is the moment the local side decoded (or created) the
/// message. It never travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub content: MessageContent,
    pub sender: DisplayName,
    pub received: Timestamp,
}

impl Message {
    /// Create a new Message
    pub fn new(content: MessageContent, sender: DisplayName, received: Timestamp) -> Self {
        Self {
            content,
            sender,
            received,
        }
    }

    /// Create the server notice announcing that `name` left the chat room.
    pub fn leave_notice(name: &str, received: Timestamp) -> Self {
        Self::new(
            MessageContent::leave_notice(name),
            DisplayName::server(),
            received,
        )
    }

    /// Whether the message was generated by the server rather than a peer.
    pub fn is_server_notice(&self) -> bool {
        self.sender == DisplayName::server()
    }
}
