//! Domain layer error definitions.

use thiserror::Error;

use super::SessionId;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// DisplayName validation error
    #[error("DisplayName cannot be empty")]
    DisplayNameEmpty,

    /// DisplayName too long error
    #[error("DisplayName cannot exceed {max} characters (got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    /// DisplayName contains control characters
    #[error("DisplayName cannot contain control characters")]
    DisplayNameInvalidCharacter,

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} bytes (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },
}

/// Per-recipient delivery errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    /// The session is not open (still connecting, or already closed)
    #[error("Session '{0}' is not open")]
    Closed(SessionId),

    /// The transport behind the session is gone
    #[error("Session '{0}' is disconnected")]
    Disconnected(SessionId),

    /// The message could not be encoded into a frame
    #[error("Failed to encode message: {0}")]
    Encode(String),
}

impl SendError {
    /// Whether the error proves that the peer can no longer receive anything.
    pub fn is_dead_peer(&self) -> bool {
        matches!(self, SendError::Closed(_) | SendError::Disconnected(_))
    }
}
