//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 送信者以外の全セッションにメッセージが中継されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：3人接続中に1人が送信
//! - エッジケース：送信者のみが接続している場合（中継対象なし）
//! - エッジケース：同じ表示名の別セッション（識別子で除外されることの確認）

use std::sync::Arc;

use crate::domain::{Message, PeerRegistry, SessionId};

use super::broadcast::{BroadcastReport, broadcast};

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    /// PeerRegistry（接続中セッション集合の抽象化）
    registry: Arc<dyn PeerRegistry>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(registry: Arc<dyn PeerRegistry>) -> Self {
        Self { registry }
    }

    /// メッセージ中継を実行
    ///
    /// # Arguments
    ///
    /// * `message` - デコード済みのメッセージ
    /// * `from` - 送信元セッションの識別子（この識別子のセッションには送らない）
    pub async fn execute(&self, message: &Message, from: &SessionId) -> BroadcastReport {
        broadcast(self.registry.as_ref(), message, Some(from)).await
    }
}
