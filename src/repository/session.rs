//! Session repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::AuthError;
use crate::session::Session;

use super::AuthUser;

/// Storage for session rows, keyed by the token digest.
///
/// Rows are plain `(id, user_id, expires_at)` records; the raw token never
/// reaches this layer. Deleting a row that is already gone is success, not
/// an error, so concurrent expiry cleanup and explicit sign-out never race
/// into a failure.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its digest id, joined with the owning user.
    ///
    /// Returns `None` when either the session or its user is absent.
    async fn find_session(
        &self,
        session_id: &str,
    ) -> Result<Option<(Session, AuthUser)>, AuthError>;

    /// Persists a new session row.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::StoreError` if the write fails, including the
    /// cryptographically negligible case of a duplicate digest.
    async fn create_session(&self, session: &Session) -> Result<(), AuthError>;

    /// Overwrites a session's expiry (sliding-window renewal).
    ///
    /// A concurrently deleted row is not an error; last-writer-wins.
    async fn update_expiry(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError>;

    /// Deletes one session row. Absent rows are success.
    async fn delete_session(&self, session_id: &str) -> Result<(), AuthError>;

    /// Deletes every session owned by the user. Zero matching rows is success.
    async fn delete_user_sessions(&self, user_id: i64) -> Result<(), AuthError>;

    /// Removes all expired sessions.
    ///
    /// Returns the number of rows pruned.
    async fn prune_expired(&self) -> Result<u64, AuthError>;
}
