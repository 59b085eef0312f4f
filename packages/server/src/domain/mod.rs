//! Domain layer for the broadcast server.
//!
//! This module contains the chat domain (messages, sessions, registry
//! interface) independent of the transport and of wire DTOs.

pub mod entity;
pub mod error;
pub mod factory;
pub mod registry;
pub mod session;
pub mod value_object;

pub use entity::Message;
pub use error::{SendError, ValueObjectError};
pub use factory::SessionIdFactory;
pub use registry::PeerRegistry;
#[cfg(test)]
pub use session::MockSession;
pub use session::{Session, SessionState, SessionStateCell, USER_PROPERTY_KEY, UserProperties};
pub use value_object::{DisplayName, MessageContent, SessionId, Timestamp};
