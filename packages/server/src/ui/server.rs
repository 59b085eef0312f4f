//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    infrastructure::codec::MessageCodec,
    usecase::{ListSessionsUseCase, SessionLifecycle},
};

use super::{
    handler::{health_check, list_sessions, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket broadcast chat server
///
/// This struct encapsulates the server dependencies and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(coordinator, list_sessions_usecase, codec);
/// server.run("127.0.0.1".to_string(), 8080, "/chat".to_string()).await?;
/// ```
pub struct Server {
    /// SessionLifecycle（セッションのライフサイクルイベントの受け口）
    lifecycle: Arc<dyn SessionLifecycle>,
    /// ListSessionsUseCase（接続中セッション一覧取得のユースケース）
    list_sessions_usecase: Arc<ListSessionsUseCase>,
    /// フレームのエンコード・デコード
    codec: Arc<MessageCodec>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `lifecycle` - Receiver of session open/message/close events
    /// * `list_sessions_usecase` - UseCase for listing open sessions
    /// * `codec` - Codec used to decode inbound frames
    pub fn new(
        lifecycle: Arc<dyn SessionLifecycle>,
        list_sessions_usecase: Arc<ListSessionsUseCase>,
        codec: Arc<MessageCodec>,
    ) -> Self {
        Self {
            lifecycle,
            list_sessions_usecase,
            codec,
        }
    }

    /// Build the router with the WebSocket endpoint mounted at `path`.
    ///
    /// `path` must start with `/`.
    pub fn router(self, path: &str) -> Router {
        let app_state = Arc::new(AppState {
            lifecycle: self.lifecycle,
            list_sessions_usecase: self.list_sessions_usecase,
            codec: self.codec,
        });

        Router::new()
            // WebSocket エンドポイント
            .route(path, get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/sessions", get(list_sessions))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server on an already bound listener until a shutdown signal arrives.
    pub async fn serve(
        self,
        listener: TcpListener,
        path: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = self.router(path);

        tracing::info!(
            "WebSocket chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!(
            "Connect to: ws://{}{}?name=<display name>",
            listener.local_addr()?,
            path
        );
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Run the WebSocket chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    /// * `path` - The WebSocket endpoint path (e.g., "/chat")
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
        path: String,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener, &path).await
    }
}
