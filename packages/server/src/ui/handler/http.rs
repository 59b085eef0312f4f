//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthDto, SessionSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
        sessions: state.list_sessions_usecase.count().await,
    })
}

/// Get list of open sessions
pub async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<Vec<SessionSummaryDto>> {
    let sessions = state.list_sessions_usecase.execute().await;

    // Domain Model から DTO への変換
    let summaries = sessions
        .iter()
        .map(|session| SessionSummaryDto {
            id: session.id().to_string(),
            name: session
                .user_properties()
                .display_name()
                .map(|name| name.into_string()),
        })
        .collect();

    Json(summaries)
}
