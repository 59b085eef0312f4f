//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{SessionId, SessionState};

/// 参加処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// Open 状態でないセッションは登録できない
    #[error("Session '{id}' cannot join while {state:?}")]
    SessionNotOpen { id: SessionId, state: SessionState },
}
