//! UseCase: ピア参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectPeerUseCase::execute() メソッド
//! - Open 状態のセッションのみがレジストリに登録されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：Open 状態のセッションの参加
//! - 異常系：Connecting / Closed 状態のセッションの参加試行

use std::sync::Arc;

use crate::domain::{PeerRegistry, Session, SessionState};

use super::error::ConnectError;

/// ピア参加のユースケース
pub struct ConnectPeerUseCase {
    /// PeerRegistry（接続中セッション集合の抽象化）
    registry: Arc<dyn PeerRegistry>,
}

impl ConnectPeerUseCase {
    /// 新しい ConnectPeerUseCase を作成
    pub fn new(registry: Arc<dyn PeerRegistry>) -> Self {
        Self { registry }
    }

    /// ピア参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 参加後の接続中セッション数
    /// * `Err(ConnectError)` - セッションが Open 状態でない
    pub async fn execute(&self, session: Arc<dyn Session>) -> Result<usize, ConnectError> {
        let state = session.state();
        if state != SessionState::Open {
            return Err(ConnectError::SessionNotOpen {
                id: session.id().clone(),
                state,
            });
        }

        self.registry.add(session).await;
        Ok(self.registry.count().await)
    }
}
