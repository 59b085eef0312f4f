//! Error types for the chat client.

use hiroba_server::domain::ValueObjectError;
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the display name during the upgrade
    #[error("Display name '{0}' was rejected by the server")]
    NameRejected(String),

    /// The display name failed local validation
    #[error("Invalid display name: {0}")]
    InvalidName(#[from] ValueObjectError),

    /// The server URL could not be parsed
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Line editor error
    #[error("Readline error: {0}")]
    Readline(String),
}
