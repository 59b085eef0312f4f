//! Session: the handle of one connected peer.
//!
//! Sessions are owned by the transport. The registry and the coordinator
//! only hold `Arc<dyn Session>` references to them.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU8, Ordering},
};

use super::{DisplayName, Message, SendError, SessionId};

/// User property key holding the declared display name.
pub const USER_PROPERTY_KEY: &str = "user";

/// Connection-scoped key/value properties of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProperties(HashMap<String, String>);

impl UserProperties {
    /// Create properties holding only the declared display name.
    pub fn with_display_name(name: &DisplayName) -> Self {
        let mut properties = Self::default();
        properties.insert(USER_PROPERTY_KEY, name.as_str());
        properties
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The declared display name, if one was stashed and is still valid.
    pub fn display_name(&self) -> Option<DisplayName> {
        self.get(USER_PROPERTY_KEY)
            .and_then(|name| DisplayName::new(name.to_string()).ok())
    }
}

/// Lifecycle state of a session: `Connecting → Open → Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Open,
    Closed,
}

impl SessionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => SessionState::Connecting,
            1 => SessionState::Open,
            _ => SessionState::Closed,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            SessionState::Connecting => 0,
            SessionState::Open => 1,
            SessionState::Closed => 2,
        }
    }
}

/// Lock-free holder of a [`SessionState`].
///
/// Transitions only move forward; `Closed` is terminal and a session never
/// re-enters `Open`.
#[derive(Debug)]
pub struct SessionStateCell(AtomicU8);

impl SessionStateCell {
    pub fn new() -> Self {
        Self(AtomicU8::new(SessionState::Connecting.as_u8()))
    }

    pub fn get(&self) -> SessionState {
        SessionState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// `Connecting → Open`. Returns `false` if the session was not connecting.
    pub fn open(&self) -> bool {
        self.0
            .compare_exchange(
                SessionState::Connecting.as_u8(),
                SessionState::Open.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Any state `→ Closed`. Returns `false` if it was already closed.
    pub fn close(&self) -> bool {
        let previous = self
            .0
            .swap(SessionState::Closed.as_u8(), Ordering::AcqRel);
        SessionState::from_u8(previous) != SessionState::Closed
    }
}

impl Default for SessionStateCell {
    fn default() -> Self {
        Self::new()
    }
}

/// One connected peer, as seen by the core.
///
/// The transport implements this trait; the coordinator drives it.
#[cfg_attr(test, mockall::automock)]
pub trait Session: Send + Sync {
    /// Opaque identity, stable for the connection's lifetime.
    fn id(&self) -> &SessionId;

    fn user_properties(&self) -> &UserProperties;

    fn state(&self) -> SessionState;

    /// Queue `message` for delivery to this peer.
    ///
    /// Must not block on network I/O. Messages queued on one session are
    /// delivered in the order they were queued.
    fn send(&self, message: &Message) -> Result<(), SendError>;

    /// Move the session to `Closed` and ask the transport to tear the
    /// connection down. Idempotent.
    fn close(&self);
}
