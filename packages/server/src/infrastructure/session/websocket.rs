//! WebSocket を使った Session 実装
//!
//! ## 責務
//!
//! - 1つの WebSocket 接続に対応するセッションの識別子・ユーザープロパティ・状態を保持
//! - メッセージをエンコードし、接続ごとの送信キュー（`UnboundedSender`）に積む
//!
//! ## 設計ノート
//!
//! 実際のソケットへの書き込みは UI 層（`src/ui/handler/websocket.rs`）の
//! pusher ループが接続ごとに行います。`send` はキューに積むだけなので、
//! 遅いピアがブロードキャスト全体を止めることはありません。
//! キューは FIFO なので、1つのピアへの配送順は送信を発行した順になります。

use std::sync::Arc;

use tokio::sync::{Notify, mpsc};

use crate::{
    domain::{
        Message, SendError, Session, SessionId, SessionState, SessionStateCell, UserProperties,
    },
    infrastructure::codec::MessageCodec,
};

/// エンコード済みフレームを pusher ループへ渡すチャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// WebSocket 接続に対応する Session 実装
pub struct WebSocketSession {
    id: SessionId,
    user_properties: UserProperties,
    state: SessionStateCell,
    /// pusher ループへの送信キュー
    outbound: PusherChannel,
    codec: Arc<MessageCodec>,
    /// close() が呼ばれたことをトランスポートに知らせる
    close_requested: Notify,
}

impl WebSocketSession {
    /// 新しい WebSocketSession を作成（状態は Connecting）
    pub fn new(
        id: SessionId,
        user_properties: UserProperties,
        outbound: PusherChannel,
        codec: Arc<MessageCodec>,
    ) -> Self {
        Self {
            id,
            user_properties,
            state: SessionStateCell::new(),
            outbound,
            codec,
            close_requested: Notify::new(),
        }
    }

    /// Connecting → Open に遷移
    pub fn open(&self) -> bool {
        self.state.open()
    }

    /// close() が呼ばれるまで待機
    ///
    /// 待機前に close() が呼ばれていた場合は即座に完了します。
    pub async fn close_requested(&self) {
        self.close_requested.notified().await;
    }
}

impl Session for WebSocketSession {
    fn id(&self) -> &SessionId {
        &self.id
    }

    fn user_properties(&self) -> &UserProperties {
        &self.user_properties
    }

    fn state(&self) -> SessionState {
        self.state.get()
    }

    fn send(&self, message: &Message) -> Result<(), SendError> {
        if self.state.get() != SessionState::Open {
            return Err(SendError::Closed(self.id.clone()));
        }

        let frame = self
            .codec
            .encode(message)
            .map_err(|e| SendError::Encode(e.to_string()))?;

        self.outbound
            .send(frame)
            .map_err(|_| SendError::Disconnected(self.id.clone()))?;
        tracing::debug!("Queued message for session '{}'", self.id);
        Ok(())
    }

    fn close(&self) {
        if self.state.close() {
            tracing::debug!("Session '{}' closed", self.id);
            self.close_requested.notify_one();
        }
    }
}
