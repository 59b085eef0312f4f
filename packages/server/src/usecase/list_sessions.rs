//! UseCase: 接続中セッション一覧の取得

use std::sync::Arc;

use crate::domain::{PeerRegistry, Session};

/// 接続中セッション一覧取得のユースケース
pub struct ListSessionsUseCase {
    /// PeerRegistry（接続中セッション集合の抽象化）
    registry: Arc<dyn PeerRegistry>,
}

impl ListSessionsUseCase {
    /// 新しい ListSessionsUseCase を作成
    pub fn new(registry: Arc<dyn PeerRegistry>) -> Self {
        Self { registry }
    }

    /// 接続中セッション一覧を取得（表示名 → ID の順でソート済み）
    pub async fn execute(&self) -> Vec<Arc<dyn Session>> {
        let mut sessions = self.registry.snapshot().await;
        sessions.sort_by_cached_key(|session| {
            (
                session.user_properties().display_name(),
                session.id().clone(),
            )
        });
        sessions
    }

    /// 接続中セッション数を取得
    pub async fn count(&self) -> usize {
        self.registry.count().await
    }
}
