//! WebSocket connection handlers.
//!
//! Each connection runs two tasks. The receive loop decodes inbound frames
//! and hands them to the coordinator. The pusher loop drains the session's
//! outbound queue into the socket.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{DisplayName, Session, SessionIdFactory, UserProperties},
    infrastructure::session::WebSocketSession,
    ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Declared display name
    pub name: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> DisplayName (Domain Model)
    let name = match DisplayName::try_from(query.name) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!("Rejecting connection with invalid display name: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Create a channel for this session to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    let session = Arc::new(WebSocketSession::new(
        SessionIdFactory::generate(),
        UserProperties::with_display_name(&name),
        tx,
        state.codec.clone(),
    ));
    tracing::info!("Session '{}' connecting as '{}'", session.id(), name);

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, session, rx)))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// A failed write closes the session, which stops its receive loop.
///
/// # Arguments
///
/// * `rx` - Channel receiver for encoded frames queued by `Session::send`
/// * `sender` - WebSocket sink to send frames to this peer
/// * `session` - The session whose queue is drained
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    session: Arc<WebSocketSession>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(frame.into())).await {
                tracing::debug!("WebSocket write failed on session '{}': {}", session.id(), e);
                session.close();
                break;
            }
        }
    })
}

/// Spawns a task that reads frames from this peer and reports them to the coordinator.
///
/// The loop ends when the peer closes the socket, a read fails, or the
/// session is closed. A close is only observed between frames, so a
/// broadcast started by `on_message` always runs to completion.
fn receive_loop<S>(
    mut receiver: S,
    state: Arc<AppState>,
    session: Arc<WebSocketSession>,
) -> tokio::task::JoinHandle<()>
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            let msg = tokio::select! {
                msg = receiver.next() => msg,
                _ = session.close_requested() => {
                    tracing::info!("Session '{}' closed by the server", session.id());
                    break;
                }
            };

            let msg = match msg {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => {
                    tracing::warn!("WebSocket error on session '{}': {}", session.id(), e);
                    break;
                }
                None => break,
            };

            match msg {
                Message::Text(text) => match state.codec.decode(text.as_str()) {
                    Ok(message) => {
                        state.lifecycle.on_message(message, session.as_ref()).await;
                    }
                    Err(e) => {
                        // Dropped silently from the sender's point of view
                        tracing::warn!(
                            "Dropping inbound message from session '{}': {}",
                            session.id(),
                            e
                        );
                    }
                },
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring binary frame ({} bytes) from session '{}'",
                        data.len(),
                        session.id()
                    );
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session.id());
                    break;
                }
                _ => {}
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    session: Arc<WebSocketSession>,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, receiver) = socket.split();

    // Connecting -> Open
    session.open();
    if let Err(e) = state.lifecycle.on_open(session.clone()).await {
        tracing::warn!("Failed to register session '{}': {}", session.id(), e);
        return;
    }

    let send_task = pusher_loop(rx, sender, session.clone());
    let recv_task = receive_loop(receiver, state.clone(), session.clone());

    // The receive loop is awaited, never aborted
    if let Err(e) = recv_task.await {
        tracing::error!("Receive loop of session '{}' failed: {}", session.id(), e);
    }
    send_task.abort();

    // Open -> Closed
    state.lifecycle.on_close(session.as_ref()).await;
}
