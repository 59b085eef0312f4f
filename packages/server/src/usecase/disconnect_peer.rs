//! UseCase: ピア退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectPeerUseCase::execute() メソッド
//! - 退出するセッションをレジストリから外してから、退出通知を残りの全員に送ること
//!
//! ### なぜこのテストが必要か
//! - 退出するセッション自身が自分の退出通知を受け取ってはならない
//! - 退出通知は Server 名義で、送信者除外なしにブロードキャストされる
//!
//! ### どのような状況を想定しているか
//! - 正常系：2人接続中に1人が退出
//! - エッジケース：最後のセッションの退出（通知対象なし）
//! - エッジケース：送信失敗で既にレジストリから外れているセッションの退出

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{Message, PeerRegistry, Session, Timestamp};

use super::broadcast::{BroadcastReport, broadcast};

/// ピア退出のユースケース
pub struct DisconnectPeerUseCase {
    /// PeerRegistry（接続中セッション集合の抽象化）
    registry: Arc<dyn PeerRegistry>,
    /// 退出通知の received に使う時計
    clock: Arc<dyn Clock>,
}

impl DisconnectPeerUseCase {
    /// 新しい DisconnectPeerUseCase を作成
    pub fn new(registry: Arc<dyn PeerRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// ピア退出を実行
    ///
    /// # Returns
    ///
    /// 退出通知のブロードキャスト結果
    pub async fn execute(&self, session: &dyn Session) -> BroadcastReport {
        // 1. 以後の送信を止める
        session.close();

        // 2. 退出通知を組み立てる前にレジストリから外す
        if !self.registry.remove(session.id()).await {
            tracing::debug!(
                "Session '{}' was not registered at close time",
                session.id()
            );
        }

        // 3. 残りの全員に退出通知（除外なし）
        let name = session
            .user_properties()
            .display_name()
            .map(|name| name.into_string())
            .unwrap_or_else(|| session.id().to_string());
        let notice = Message::leave_notice(&name, Timestamp::new(self.clock.now_millis()));

        broadcast(self.registry.as_ref(), &notice, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, SessionIdFactory, SessionState, UserProperties},
        infrastructure::{
            codec::MessageCodec, registry::InMemoryPeerRegistry, session::WebSocketSession,
        },
    };
    use hiroba_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn create_open_session(
        name: &str,
    ) -> (Arc<WebSocketSession>, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Arc::new(WebSocketSession::new(
            SessionIdFactory::generate(),
            UserProperties::with_display_name(&DisplayName::new(name.to_string()).unwrap()),
            tx,
            Arc::new(MessageCodec::default()),
        ));
        session.open();
        (session, rx)
    }

    fn create_usecase(registry: Arc<InMemoryPeerRegistry>) -> DisconnectPeerUseCase {
        DisconnectPeerUseCase::new(registry, Arc::new(FixedClock::new(1672531200000)))
    }

    #[tokio::test]
    async fn test_disconnect_notifies_remaining_peers() {
        // テスト項目: bob が退出すると、alice だけが Server 名義の退出通知を受け取る
        // given (前提条件):
        let registry = Arc::new(InMemoryPeerRegistry::new());
        let usecase = create_usecase(registry.clone());
        let (alice, mut alice_rx) = create_open_session("alice");
        let (bob, mut bob_rx) = create_open_session("bob");
        registry.add(alice.clone()).await;
        registry.add(bob.clone()).await;

        // when (操作):
        let report = usecase.execute(bob.as_ref()).await;

        // then (期待する結果):
        assert_eq!(report.delivered, vec![alice.id().clone()]);
        let notice = MessageCodec::default()
            .decode(&alice_rx.try_recv().unwrap())
            .unwrap();
        assert_eq!(notice.sender.as_str(), "Server");
        assert_eq!(notice.content.as_str(), "bob left the chat room");

        // bob は自分の退出通知を受け取らない
        assert!(bob_rx.try_recv().is_err());
        assert_eq!(bob.state(), SessionState::Closed);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_last_peer() {
        // テスト項目: 最後のセッションが退出した場合、通知対象は空
        // given (前提条件):
        let registry = Arc::new(InMemoryPeerRegistry::new());
        let usecase = create_usecase(registry.clone());
        let (alice, _alice_rx) = create_open_session("alice");
        registry.add(alice.clone()).await;

        // when (操作):
        let report = usecase.execute(alice.as_ref()).await;

        // then (期待する結果):
        assert!(report.delivered.is_empty());
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_unregistered_peer_still_notifies() {
        // テスト項目: 既にレジストリから外れているセッションの退出でも通知は送られる
        // given (前提条件):
        let registry = Arc::new(InMemoryPeerRegistry::new());
        let usecase = create_usecase(registry.clone());
        let (alice, mut alice_rx) = create_open_session("alice");
        let (carol, _carol_rx) = create_open_session("carol");
        registry.add(alice.clone()).await;

        // when (操作):
        let report = usecase.execute(carol.as_ref()).await;

        // then (期待する結果):
        assert!(report.delivered_to(alice.id()));
        assert!(alice_rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_disconnect_without_display_name_uses_session_id() {
        // テスト項目: 表示名がないセッションの退出通知にはセッション ID が使われる
        // given (前提条件):
        let registry = Arc::new(InMemoryPeerRegistry::new());
        let usecase = create_usecase(registry.clone());
        let (alice, mut alice_rx) = create_open_session("alice");
        let (tx, _rx) = mpsc::unbounded_channel();
        let anonymous = Arc::new(WebSocketSession::new(
            SessionIdFactory::generate(),
            UserProperties::default(),
            tx,
            Arc::new(MessageCodec::default()),
        ));
        anonymous.open();
        registry.add(alice.clone()).await;
        registry.add(anonymous.clone()).await;

        // when (操作):
        usecase.execute(anonymous.as_ref()).await;

        // then (期待する結果):
        let notice = MessageCodec::default()
            .decode(&alice_rx.try_recv().unwrap())
            .unwrap();
        assert_eq!(
            notice.content.as_str(),
            format!("{} left the chat room", anonymous.id())
        );
    }
}
