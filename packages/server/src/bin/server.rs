//! WebSocket chat server with broadcast functionality.
//!
//! Receives messages from clients and broadcasts them to all other connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --path /chat
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    infrastructure::{codec::MessageCodec, registry::InMemoryPeerRegistry},
    ui::Server,
    usecase::{BroadcastCoordinator, ListSessionsUseCase},
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "WebSocket chat server with broadcast support", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Path of the WebSocket endpoint
    #[arg(long, default_value = "/chat", value_parser = parse_endpoint_path)]
    path: String,
}

fn parse_endpoint_path(path: &str) -> Result<String, String> {
    if path.starts_with('/') && !path.starts_with("/api/") {
        Ok(path.to_string())
    } else {
        Err("path must start with '/' and must not be under /api/".to_string())
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry and clock
    // 2. Coordinator and UseCases
    // 3. Server

    // 1. Create Registry (in-memory set of open sessions)
    let registry = Arc::new(InMemoryPeerRegistry::new());
    let clock = Arc::new(SystemClock);

    // 2. Create Coordinator and UseCases
    let coordinator = Arc::new(BroadcastCoordinator::new(registry.clone(), clock.clone()));
    let list_sessions_usecase = Arc::new(ListSessionsUseCase::new(registry));
    let codec = Arc::new(MessageCodec::new(clock));

    // 3. Create and run the server
    let server = Server::new(coordinator, list_sessions_usecase, codec);
    if let Err(e) = server.run(args.host, args.port, args.path).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
