//! # Storage Traits
//!
//! Abstractions that let the domain layer persist the session without
//! knowing the backing format. The shipped implementation is a single JSON
//! document on disk; tests and alternative hosts can substitute their own.

use anyhow::Result;

use crate::domain::models::session::SessionState;

/// Trait defining the interface for session storage operations
pub trait SessionStorage: Send + Sync {
    /// Load the previously saved session, if any. Missing or malformed data
    /// yields `Ok(None)`; content problems never become caller errors.
    fn load_session(&self) -> Result<Option<SessionState>>;

    /// Persist the whole session, replacing any previous copy.
    fn save_session(&self, state: &SessionState) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// A connection is a handle to wherever the data lives and acts as a factory
/// for repositories, so services stay generic over the storage backend.
pub trait Connection: Send + Sync + Clone {
    /// The type of SessionStorage this connection creates
    type SessionRepository: SessionStorage;

    /// Create a new session repository for this connection
    fn create_session_repository(&self) -> Self::SessionRepository;
}
