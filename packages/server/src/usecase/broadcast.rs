//! ファンアウト（スナップショット → 送信）の共通処理
//!
//! 1. レジストリのスナップショットを取得（ロックはここで解放される）
//! 2. 除外対象以外の各セッションに `send` を発行
//! 3. 送信失敗は宛先ごとに隔離し、接続断が判明したピアはレジストリから外して close する

use crate::domain::{Message, PeerRegistry, SendError, SessionId};

/// 1回のブロードキャストの結果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    /// 送信キューに積めたセッション
    pub delivered: Vec<SessionId>,
    /// 送信に失敗したセッションとその理由
    pub failed: Vec<(SessionId, SendError)>,
}

impl BroadcastReport {
    /// 送信に成功した宛先に `session_id` が含まれるか
    pub fn delivered_to(&self, session_id: &SessionId) -> bool {
        self.delivered.contains(session_id)
    }
}

/// レジストリ上のセッションにメッセージをブロードキャスト
///
/// # Arguments
///
/// * `registry` - 宛先を取得するレジストリ
/// * `message` - 送信するメッセージ
/// * `exclude` - 除外するセッション（送信者）。識別子で比較する
pub async fn broadcast(
    registry: &dyn PeerRegistry,
    message: &Message,
    exclude: Option<&SessionId>,
) -> BroadcastReport {
    let targets = registry.snapshot().await;
    let mut report = BroadcastReport::default();

    for target in targets {
        if exclude.is_some_and(|id| id == target.id()) {
            continue;
        }

        match target.send(message) {
            Ok(()) => report.delivered.push(target.id().clone()),
            Err(e) => {
                // ブロードキャストでは一部の送信失敗を許容
                tracing::warn!("Failed to send message to session '{}': {}", target.id(), e);
                if e.is_dead_peer() {
                    registry.remove(target.id()).await;
                    target.close();
                }
                report.failed.push((target.id().clone(), e));
            }
        }
    }

    report
}
