//! Domain factories for creating value objects.

use super::SessionId;

/// Factory for generating SessionId instances.
///
/// Session identities are assigned by the transport when a connection is
/// accepted; this factory is the only place that mints new ones.
pub struct SessionIdFactory;

impl SessionIdFactory {
    /// Generate a new SessionId with a random UUID v4.
    pub fn generate() -> SessionId {
        SessionId::from_uuid(uuid::Uuid::new_v4())
    }
}
