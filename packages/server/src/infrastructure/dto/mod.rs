//! DTO（Data Transfer Object）
//!
//! プロトコルごとに分けています:
//! - `websocket`: WebSocket フレームのペイロード
//! - `http`: HTTP API のレスポンス

pub mod http;
pub mod websocket;
