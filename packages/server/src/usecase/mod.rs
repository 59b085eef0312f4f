//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（トランスポート）から `SessionLifecycle` 経由で呼び出され、Domain 層を操作します。

pub mod broadcast;
pub mod connect_peer;
pub mod coordinator;
pub mod disconnect_peer;
pub mod error;
pub mod list_sessions;
pub mod relay_message;

pub use broadcast::BroadcastReport;
pub use connect_peer::ConnectPeerUseCase;
pub use coordinator::{BroadcastCoordinator, SessionLifecycle};
pub use disconnect_peer::DisconnectPeerUseCase;
pub use error::ConnectError;
pub use list_sessions::ListSessionsUseCase;
pub use relay_message::RelayMessageUseCase;
