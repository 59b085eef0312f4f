//! Session の実装
//!
//! - `websocket`: WebSocket の送信チャンネルを使った実装

pub mod websocket;

pub use websocket::{PusherChannel, WebSocketSession};
