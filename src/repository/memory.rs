//! In-memory credential store.
//!
//! Suitable for tests and single-instance deployments. Implements both
//! [`UserRepository`] and [`SessionRepository`] over shared maps, the same
//! shape a relational backend would give you with a `users` and a
//! `sessions` table.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::AuthError;
use crate::session::Session;

use super::session::SessionRepository;
use super::user::{AuthUser, UserRepository};

/// In-memory user and session storage.
///
/// Cloning is cheap and clones share state, so the same store can back a
/// [`SessionAuthenticator`](crate::SessionAuthenticator) and the auth
/// actions at once.
///
/// # Note
///
/// All rows are lost when the process exits.
#[derive(Clone)]
pub struct InMemoryRepository {
    users: Arc<Mutex<Vec<AuthUser>>>,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    next_user_id: Arc<Mutex<i64>>,
}

fn poisoned(_: impl std::fmt::Debug) -> AuthError {
    AuthError::StoreError("lock poisoned".to_owned())
}

impl InMemoryRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_user_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Returns the number of session rows currently stored.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns the number of user rows currently stored.
    pub fn user_count(&self) -> usize {
        self.users.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn find_user_by_id(&self, id: i64) -> Result<Option<AuthUser>, AuthError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(
        &self,
        username: &str,
        hashed_password: &str,
    ) -> Result<AuthUser, AuthError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        if users.iter().any(|u| u.username == username) {
            return Err(AuthError::UniqueViolation);
        }

        let mut next_id = self.next_user_id.lock().map_err(poisoned)?;
        let now = Utc::now();
        let user = AuthUser {
            id: *next_id,
            username: username.to_owned(),
            hashed_password: hashed_password.to_owned(),
            created_at: now,
            updated_at: now,
        };
        *next_id += 1;
        users.push(user.clone());

        Ok(user)
    }

    async fn update_password(
        &self,
        user_id: i64,
        hashed_password: &str,
    ) -> Result<(), AuthError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
            hashed_password.clone_into(&mut user.hashed_password);
            user.updated_at = Utc::now();
            Ok(())
        } else {
            Err(AuthError::UserNotFound)
        }
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), AuthError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        let len_before = users.len();
        users.retain(|u| u.id != user_id);
        if users.len() < len_before {
            Ok(())
        } else {
            Err(AuthError::UserNotFound)
        }
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn find_session(
        &self,
        session_id: &str,
    ) -> Result<Option<(Session, AuthUser)>, AuthError> {
        let session = {
            let sessions = self.sessions.lock().map_err(poisoned)?;
            sessions.get(session_id).cloned()
        };

        let Some(session) = session else {
            return Ok(None);
        };

        // Join with the owning user; a dangling session reads as absent.
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users
            .iter()
            .find(|u| u.id == session.user_id)
            .cloned()
            .map(|user| (session, user)))
    }

    async fn create_session(&self, session: &Session) -> Result<(), AuthError> {
        let mut sessions = self.sessions.lock().map_err(poisoned)?;
        if sessions.contains_key(&session.id) {
            return Err(AuthError::StoreError("duplicate session id".to_owned()));
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn update_expiry(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        if let Some(session) = self
            .sessions
            .lock()
            .map_err(poisoned)?
            .get_mut(session_id)
        {
            session.expires_at = expires_at;
        }
        Ok(())
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), AuthError> {
        self.sessions.lock().map_err(poisoned)?.remove(session_id);
        Ok(())
    }

    async fn delete_user_sessions(&self, user_id: i64) -> Result<(), AuthError> {
        self.sessions
            .lock()
            .map_err(poisoned)?
            .retain(|_, session| session.user_id != user_id);
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    async fn prune_expired(&self) -> Result<u64, AuthError> {
        let mut sessions = self.sessions.lock().map_err(poisoned)?;

        let now = Utc::now();
        let before_count = sessions.len();
        sessions.retain(|_, session| session.expires_at > now);

        let pruned = before_count.saturating_sub(sessions.len());
        Ok(u64::try_from(pruned).unwrap_or(u64::MAX))
    }
}
