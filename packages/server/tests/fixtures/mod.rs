//! Test fixtures: an in-process server on an ephemeral port and WebSocket clients.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    infrastructure::{codec::MessageCodec, registry::InMemoryPeerRegistry},
    ui::Server,
    usecase::{BroadcastCoordinator, ListSessionsUseCase},
};
use hiroba_shared::time::SystemClock;
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

pub const ENDPOINT_PATH: &str = "/chat";

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_TIMEOUT: Duration = Duration::from_millis(200);

/// Helper struct to manage server task lifecycle
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server on an ephemeral port
    pub async fn start() -> Self {
        let registry = Arc::new(InMemoryPeerRegistry::new());
        let clock = Arc::new(SystemClock);
        let coordinator = Arc::new(BroadcastCoordinator::new(registry.clone(), clock.clone()));
        let list_sessions_usecase = Arc::new(ListSessionsUseCase::new(registry));
        let codec = Arc::new(MessageCodec::new(clock));
        let server = Server::new(coordinator, list_sessions_usecase, codec);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let handle = tokio::spawn(async move {
            let _ = server.serve(listener, ENDPOINT_PATH).await;
        });

        TestServer { addr, handle }
    }

    /// Get the HTTP base URL for this server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the WebSocket URL for this server, without query
    pub fn ws_url(&self) -> String {
        format!("ws://{}{}", self.addr, ENDPOINT_PATH)
    }

    /// Current number of registered sessions, read from the health endpoint
    pub async fn session_count(&self) -> usize {
        let body: serde_json::Value = reqwest::get(format!("{}/api/health", self.base_url()))
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");
        body["sessions"].as_u64().expect("sessions should be a number") as usize
    }

    /// Wait until exactly `expected` sessions are registered
    pub async fn wait_for_sessions(&self, expected: usize) {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let count = self.session_count().await;
            if count == expected {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "Expected {} sessions, still {}",
                expected,
                count
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Helper struct wrapping one WebSocket peer
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect with the given display name
    pub async fn connect(server: &TestServer, name: &str) -> Self {
        let (stream, _response) = connect_async(format!("{}?name={}", server.ws_url(), name))
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    /// Send a chat payload
    pub async fn send_chat(&mut self, content: &str, sender: &str) {
        let payload = serde_json::json!({
            "message": content,
            "sender": sender,
            "received": "",
        });
        self.send_raw(&payload.to_string()).await;
    }

    /// Send an arbitrary text frame
    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    /// Receive the next text frame as JSON
    pub async fn recv_json(&mut self) -> serde_json::Value {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for a frame")
                .expect("Stream ended")
                .expect("WebSocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
            }
        }
    }

    /// Assert that no text frame arrives for a short while
    pub async fn assert_silent(&mut self) {
        let result = tokio::time::timeout(SILENCE_TIMEOUT, self.stream.next()).await;
        if let Ok(Some(Ok(Message::Text(text)))) = result {
            panic!("Unexpected frame: {}", text.as_str());
        }
    }

    /// Close the connection from the client side
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
