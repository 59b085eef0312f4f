//! Reconnect decisions, kept free of I/O.

use crate::error::ClientError;

/// Whether the error is permanent, so retrying with the same input is pointless.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::NameRejected(_)
            | ClientError::InvalidName(_)
            | ClientError::InvalidUrl(_)
            | ClientError::Readline(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// `current_attempt` is the number of failures so far.
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
