//! BroadcastCoordinator: 全セッションのライフサイクルイベント
//!
//! トランスポートは各セッションを `Connecting → Open → Closed` と遷移させ、
//! その遷移を [`SessionLifecycle`] 経由で通知します。
//! 1つのセッションのハンドラはそのトランスポートタスクから順に呼ばれ、
//! 異なるセッションのハンドラは並行に呼ばれます。

use std::sync::Arc;

use async_trait::async_trait;
use hiroba_shared::time::{Clock, timestamp_to_rfc3339};

use crate::domain::{Message, PeerRegistry, Session};

use super::{
    BroadcastReport, ConnectError, ConnectPeerUseCase, DisconnectPeerUseCase, RelayMessageUseCase,
};

/// トランスポートがセッションのイベントを通知するためのインターフェース
#[async_trait]
pub trait SessionLifecycle: Send + Sync {
    /// セッションが `Open` になった
    async fn on_open(&self, session: Arc<dyn Session>) -> Result<(), ConnectError>;

    /// `from` で受信したメッセージのデコードが完了した
    async fn on_message(&self, message: Message, from: &dyn Session) -> BroadcastReport;

    /// トランスポートがセッションを破棄した
    async fn on_close(&self, session: &dyn Session) -> BroadcastReport;
}

/// 参加・送信者除外・退出通知のルールを適用する
pub struct BroadcastCoordinator {
    connect_peer_usecase: ConnectPeerUseCase,
    relay_message_usecase: RelayMessageUseCase,
    disconnect_peer_usecase: DisconnectPeerUseCase,
}

impl BroadcastCoordinator {
    pub fn new(registry: Arc<dyn PeerRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self {
            connect_peer_usecase: ConnectPeerUseCase::new(registry.clone()),
            relay_message_usecase: RelayMessageUseCase::new(registry.clone()),
            disconnect_peer_usecase: DisconnectPeerUseCase::new(registry, clock),
        }
    }
}

#[async_trait]
impl SessionLifecycle for BroadcastCoordinator {
    async fn on_open(&self, session: Arc<dyn Session>) -> Result<(), ConnectError> {
        let session_id = session.id().clone();
        let name = session.user_properties().display_name();
        let count = self.connect_peer_usecase.execute(session).await?;
        tracing::info!(
            "Session '{}' ({}) joined, {} session(s) connected",
            session_id,
            name.as_ref().map_or("anonymous", |n| n.as_str()),
            count
        );
        Ok(())
    }

    async fn on_message(&self, message: Message, from: &dyn Session) -> BroadcastReport {
        tracing::info!(
            "Broadcasting message from '{}' ({}) received at {} to other sessions",
            message.sender,
            from.id(),
            timestamp_to_rfc3339(message.received.value()).unwrap_or_default()
        );
        let report = self.relay_message_usecase.execute(&message, from.id()).await;
        tracing::debug!(
            "Message from '{}' delivered to {} session(s), {} failure(s)",
            from.id(),
            report.delivered.len(),
            report.failed.len()
        );
        report
    }

    async fn on_close(&self, session: &dyn Session) -> BroadcastReport {
        let report = self.disconnect_peer_usecase.execute(session).await;
        tracing::info!(
            "Session '{}' left, leave notice delivered to {} session(s)",
            session.id(),
            report.delivered.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, MessageContent, SessionIdFactory, Timestamp, UserProperties},
        infrastructure::{
            codec::MessageCodec, registry::InMemoryPeerRegistry, session::WebSocketSession,
        },
    };
    use hiroba_shared::time::FixedClock;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - on_open / on_message / on_close を通したセッションのライフサイクル全体
    //
    // 【どのようなシナリオをテストするか】
    // 1. alice, bob が参加 → alice の発言が bob にだけ届く → bob 退出で alice に退出通知
    // 2. Open でないセッションの参加は拒否される
    // 3. 退出後のセッションにはブロードキャストされない
    // ========================================

    struct Peer {
        session: Arc<WebSocketSession>,
        rx: mpsc::UnboundedReceiver<String>,
    }

    fn create_peer(name: &str) -> Peer {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Arc::new(WebSocketSession::new(
            SessionIdFactory::generate(),
            UserProperties::with_display_name(&DisplayName::new(name.to_string()).unwrap()),
            tx,
            Arc::new(MessageCodec::default()),
        ));
        Peer { session, rx }
    }

    async fn open(coordinator: &BroadcastCoordinator, peer: &Peer) {
        peer.session.open();
        coordinator.on_open(peer.session.clone()).await.unwrap();
    }

    fn create_coordinator() -> (BroadcastCoordinator, Arc<InMemoryPeerRegistry>) {
        let registry = Arc::new(InMemoryPeerRegistry::new());
        let coordinator =
            BroadcastCoordinator::new(registry.clone(), Arc::new(FixedClock::new(1000)));
        (coordinator, registry)
    }

    fn chat(content: &str, sender: &str) -> Message {
        Message::new(
            MessageContent::new(content.to_string()).unwrap(),
            DisplayName::new(sender.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    #[tokio::test]
    async fn test_alice_and_bob_scenario() {
        // テスト項目: alice の発言が bob に届き、bob の退出が alice に通知される
        // given (前提条件):
        let (coordinator, registry) = create_coordinator();
        let mut alice = create_peer("alice");
        let mut bob = create_peer("bob");
        open(&coordinator, &alice).await;
        open(&coordinator, &bob).await;

        // when (操作): alice が発言
        coordinator
            .on_message(chat("hi", "alice"), alice.session.as_ref())
            .await;

        // then (期待する結果): bob だけが受信し、received は bob 側のデコード時刻
        let bob_codec = MessageCodec::new(Arc::new(FixedClock::new(2000)));
        let received = bob_codec.decode(&bob.rx.try_recv().unwrap()).unwrap();
        assert_eq!(received.content.as_str(), "hi");
        assert_eq!(received.sender.as_str(), "alice");
        assert_eq!(received.received, Timestamp::new(2000));
        assert!(alice.rx.try_recv().is_err());

        // when (操作): bob が退出
        coordinator.on_close(bob.session.as_ref()).await;

        // then (期待する結果): alice だけが退出通知を受け取る
        let notice = MessageCodec::default()
            .decode(&alice.rx.try_recv().unwrap())
            .unwrap();
        assert_eq!(notice.sender.as_str(), "Server");
        assert_eq!(notice.content.as_str(), "bob left the chat room");
        assert!(bob.rx.try_recv().is_err());
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_on_open_rejects_connecting_session() {
        // テスト項目: Open に遷移していないセッションは登録されない
        // given (前提条件):
        let (coordinator, registry) = create_coordinator();
        let peer = create_peer("alice");

        // when (操作):
        let result = coordinator.on_open(peer.session.clone()).await;

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_closed_session_receives_no_further_broadcasts() {
        // テスト項目: 退出したセッションには以後のブロードキャストが届かない
        // given (前提条件):
        let (coordinator, _registry) = create_coordinator();
        let alice = create_peer("alice");
        let mut bob = create_peer("bob");
        let mut carol = create_peer("carol");
        open(&coordinator, &alice).await;
        open(&coordinator, &bob).await;
        open(&coordinator, &carol).await;
        coordinator.on_close(carol.session.as_ref()).await;
        bob.rx.try_recv().unwrap(); // carol の退出通知

        // when (操作):
        let report = coordinator
            .on_message(chat("still here?", "alice"), alice.session.as_ref())
            .await;

        // then (期待する結果):
        assert_eq!(report.delivered, vec![bob.session.id().clone()]);
        assert!(bob.rx.try_recv().is_ok());
        assert!(carol.rx.try_recv().is_err());
    }
}
