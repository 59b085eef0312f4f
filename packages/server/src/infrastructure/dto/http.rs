//! HTTP API レスポンスの DTO

use serde::{Deserialize, Serialize};

/// ヘルスチェックのレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// 登録中のセッション数
    pub sessions: usize,
}

/// 接続中セッション1件の概要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub id: String,
    /// 申告された表示名（あれば）
    pub name: Option<String>,
}
