//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{
    infrastructure::codec::MessageCodec,
    usecase::{ListSessionsUseCase, SessionLifecycle},
};

/// Shared application state
pub struct AppState {
    /// SessionLifecycle（セッションのライフサイクルイベントの受け口）
    pub lifecycle: Arc<dyn SessionLifecycle>,
    /// ListSessionsUseCase（接続中セッション一覧取得のユースケース）
    pub list_sessions_usecase: Arc<ListSessionsUseCase>,
    /// フレームのエンコード・デコード
    pub codec: Arc<MessageCodec>,
}
