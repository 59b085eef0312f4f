//! WebSocket transport and HTTP surface of the broadcast server.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
