//! メッセージコーデック: `Message` ⇄ JSON テキストフレーム
//!
//! ワイヤー上で意味を持つのは `message` と `sender` だけです。
//! `received` は空文字で書き出し、デコード時はデコード側の時計で付与します。
//! そのため `received` は常にフレームを読んだ側の処理時刻を表します。

use std::sync::Arc;

use hiroba_shared::time::{Clock, SystemClock};
use thiserror::Error;

use crate::{
    domain::{DisplayName, Message, MessageContent, Timestamp, ValueObjectError},
    infrastructure::dto::websocket::MessagePayload,
};

/// コーデックのエラー。いずれもフレーム1つ分に閉じる
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// JSON オブジェクトでない、または必須フィールドが欠けている・文字列でない
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// フィールドはあるがドメインの制約に違反している
    #[error("Invalid field: {0}")]
    InvalidField(#[from] ValueObjectError),

    /// シリアライズに失敗
    #[error("Failed to encode message: {0}")]
    Encode(String),
}

/// チャットメッセージの JSON コーデック
#[derive(Clone)]
pub struct MessageCodec {
    clock: Arc<dyn Clock>,
}

impl MessageCodec {
    /// デコードしたメッセージに `clock` の時刻を付与するコーデックを作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// メッセージをテキストフレームにエンコード（`received` は出力しない）
    pub fn encode(&self, message: &Message) -> Result<String, CodecError> {
        let payload = MessagePayload {
            message: message.content.as_str().to_string(),
            sender: message.sender.as_str().to_string(),
            received: String::new(),
        };
        serde_json::to_string(&payload).map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// テキストフレームを「今受信した」メッセージにデコード
    ///
    /// フィールドは名前で対応付けるため、JSON オブジェクト以外（配列など）は受け付けない。
    pub fn decode(&self, text: &str) -> Result<Message, CodecError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| CodecError::MalformedPayload(e.to_string()))?;
        if !value.is_object() {
            return Err(CodecError::MalformedPayload(
                "expected a JSON object".to_string(),
            ));
        }
        let payload: MessagePayload = serde_json::from_value(value)
            .map_err(|e| CodecError::MalformedPayload(e.to_string()))?;

        let content = MessageContent::new(payload.message)?;
        let sender = DisplayName::new(payload.sender)?;
        let received = Timestamp::new(self.clock.now_millis());

        Ok(Message::new(content, sender, received))
    }
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}
