//! InMemory PeerRegistry 実装
//!
//! ドメイン層が定義する PeerRegistry trait の具体的な実装。
//! `Mutex<HashMap>` を使い、全ての操作を単一のロックで直列化します（線形化可能）。
//!
//! ## 設計ノート
//!
//! ロックはマップ操作の間だけ保持されます。ブロードキャスト時の送信は
//! `snapshot()` で得たコピーに対して行われ、ロックの外で実行されます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{PeerRegistry, Session, SessionId};

/// インメモリ PeerRegistry 実装
#[derive(Default)]
pub struct InMemoryPeerRegistry {
    /// 接続中のセッション
    ///
    /// Key: SessionId
    /// Value: セッションへの参照（所有はしない）
    sessions: Mutex<HashMap<SessionId, Arc<dyn Session>>>,
}

impl InMemoryPeerRegistry {
    /// 新しい InMemoryPeerRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PeerRegistry for InMemoryPeerRegistry {
    async fn add(&self, session: Arc<dyn Session>) {
        let mut sessions = self.sessions.lock().await;
        let session_id = session.id().clone();
        if sessions.contains_key(&session_id) {
            tracing::debug!("Session '{}' is already registered", session_id);
            return;
        }
        sessions.insert(session_id.clone(), session);
        tracing::debug!("Session '{}' registered to PeerRegistry", session_id);
    }

    async fn remove(&self, session_id: &SessionId) -> bool {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(session_id).is_some();
        if removed {
            tracing::debug!("Session '{}' unregistered from PeerRegistry", session_id);
        }
        removed
    }

    async fn snapshot(&self) -> Vec<Arc<dyn Session>> {
        let sessions = self.sessions.lock().await;
        sessions.values().cloned().collect()
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}
