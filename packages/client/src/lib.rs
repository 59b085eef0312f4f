//! Interactive CLI client for the Hiroba chat broadcast server.

mod domain;
mod formatter;
mod input;
mod runner;
mod session;
mod ui;

pub mod error;

pub use runner::{MAX_RECONNECT_ATTEMPTS, QUIT_COMMAND, RECONNECT_INTERVAL_SECS, run_client};
