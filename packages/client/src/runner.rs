//! Client execution logic with reconnection support.

use std::time::Duration;

use hiroba_server::domain::DisplayName;
use url::Url;

use super::{
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    input::spawn_input_thread,
    session::{SessionEnd, run_client_session},
    ui::prompt_display_name,
};

pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
pub const RECONNECT_INTERVAL_SECS: u64 = 5;
/// Line that ends the session instead of being sent.
pub const QUIT_COMMAND: &str = "/quit";

/// Run the WebSocket client with reconnection logic.
///
/// Prompts for a display name when `name` is `None`.
pub async fn run_client(url: String, name: Option<String>) -> Result<(), ClientError> {
    let base = Url::parse(&url)?;
    let name = match name {
        Some(name) => DisplayName::new(name)?,
        None => prompt_display_name()?,
    };

    let mut input_rx = spawn_input_thread(format!("{}> ", name));
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            base,
            name,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&base, &name, &mut input_rx).await {
            Ok(SessionEnd::UserExit) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    return Err(e);
                }

                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
