use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// A user account row.
///
/// Owned by the credential store; this crate only reads it to attach to a
/// validated session and creates it at sign-up. The password digest is never
/// serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, id: i64) -> Result<Option<AuthUser>, AuthError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;

    /// Creates a user row.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UniqueViolation` when the username is already
    /// taken; implementations map their database's unique-constraint error
    /// to this variant rather than pre-checking.
    async fn create_user(
        &self,
        username: &str,
        hashed_password: &str,
    ) -> Result<AuthUser, AuthError>;

    async fn update_password(&self, user_id: i64, hashed_password: &str)
        -> Result<(), AuthError>;

    async fn delete_user(&self, user_id: i64) -> Result<(), AuthError>;
}
