//! PeerRegistry trait definition.
//!
//! The interface the domain needs for "the set of connected sessions".
//! The infrastructure layer provides the concrete implementation.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Session, SessionId};

/// Peer Registry trait
///
/// The only shared mutable state of the broadcast core. The registry never
/// owns a session, it only holds `Arc` references.
///
/// ## Consistency
///
/// - `add`, `remove` and `snapshot` may be called concurrently and each appears atomic
/// - `snapshot` is a point-in-time copy, so no send happens while the lock is held
#[async_trait]
pub trait PeerRegistry: Send + Sync {
    /// Add a session (no-op if already present)
    async fn add(&self, session: Arc<dyn Session>);

    /// Remove a session
    ///
    /// Removing an unknown session is not an error and returns `false`.
    async fn remove(&self, session_id: &SessionId) -> bool;

    /// Take a snapshot of the current members
    async fn snapshot(&self) -> Vec<Arc<dyn Session>>;

    /// Number of registered sessions
    async fn count(&self) -> usize;
}
