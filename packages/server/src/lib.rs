//! Hiroba broadcast chat server library.
//!
//! Peers connect over WebSocket, and every message one peer sends is
//! relayed to all other connected peers. When a peer leaves, the remaining
//! peers receive a notice from the server.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
