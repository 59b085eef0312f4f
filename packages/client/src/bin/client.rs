//! Interactive chat client with reconnection support.
//!
//! Connects to a Hiroba server, sends every entered line as a chat message,
//! and prints what the other peers say. Type `/quit` to leave.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --name alice
//! cargo run --bin hiroba-client -- -u ws://127.0.0.1:8080/chat
//! ```

use clap::Parser;

use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Chat client for the Hiroba broadcast server", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/chat")]
    url: String,

    /// Display name shown to other peers (prompted for when omitted)
    #[arg(short = 'n', long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = hiroba_client::run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
