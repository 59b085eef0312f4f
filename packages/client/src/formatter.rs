//! Message formatting utilities for client display.

use hiroba_server::domain::Message;
use hiroba_shared::time::timestamp_to_local_clock;

const UNKNOWN_TIME: &str = "--:--:--";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a received message as `[HH:MM:SS] sender: content`.
    ///
    /// The time is the locally assigned `received` timestamp. Server notices
    /// are prefixed with `*` so they stand apart from chat lines.
    pub fn format_message(message: &Message) -> String {
        let clock = Self::clock(message.received.value());
        if message.is_server_notice() {
            format!("\n[{}] * {}\n", clock, message.content)
        } else {
            format!("\n[{}] {}: {}\n", clock, message.sender, message.content)
        }
    }

    /// Format a confirmation line after sending
    pub fn format_sent_confirmation(sent_at: i64) -> String {
        format!("sent at {}\n", Self::clock(sent_at))
    }

    /// Format a frame the client could not decode
    pub fn format_raw_message(text: &str) -> String {
        format!("\n<- Received: {}\n", text)
    }

    fn clock(millis: i64) -> String {
        timestamp_to_local_clock(millis).unwrap_or_else(|| UNKNOWN_TIME.to_string())
    }
}
