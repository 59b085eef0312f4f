//! WebSocket フレームのペイロード DTO

use serde::{Deserialize, Serialize};

/// テキストフレームで運ばれるチャットメッセージ
///
/// `received` は常に空文字で書き出す。読み込み時は値の型を問わず無視する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub message: String,
    pub sender: String,
    #[serde(default, skip_deserializing)]
    pub received: String,
}
