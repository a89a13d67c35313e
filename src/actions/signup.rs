use chrono::Utc;

use crate::crypto::{Argon2Hasher, PasswordHasher, SecretString};
use crate::events::{AuthEvent, dispatch};
use crate::repository::{AuthUser, SessionRepository, UserRepository};
use crate::session::{IssuedSession, SessionAuthenticator};
use crate::AuthError;

/// Registers a user and signs them in: a successful signup always comes
/// with a first session, so the client lands authenticated.
pub struct SignupAction<U, S, H = Argon2Hasher>
where
    U: UserRepository,
    S: SessionRepository,
{
    users: U,
    authenticator: SessionAuthenticator<S>,
    hasher: H,
}

impl<U: UserRepository, S: SessionRepository> SignupAction<U, S, Argon2Hasher> {
    pub fn new(users: U, authenticator: SessionAuthenticator<S>) -> Self {
        Self {
            users,
            authenticator,
            hasher: Argon2Hasher::default(),
        }
    }
}

impl<U: UserRepository, S: SessionRepository, H: PasswordHasher> SignupAction<U, S, H> {
    pub fn with_hasher(users: U, authenticator: SessionAuthenticator<S>, hasher: H) -> Self {
        Self {
            users,
            authenticator,
            hasher,
        }
    }

    /// Creates the user and issues their first session.
    ///
    /// No existence pre-check: the store's unique constraint on the username
    /// is the source of truth and surfaces as `AuthError::UniqueViolation`.
    /// On that error no session is issued.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "signup", skip_all, err))]
    pub async fn execute(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<(AuthUser, IssuedSession), AuthError> {
        let hashed = self.hasher.hash(password.expose_secret())?;
        let user = self.users.create_user(username, &hashed).await?;

        let issued = self.authenticator.start_session(user.id).await?;

        dispatch(AuthEvent::UserRegistered {
            user_id: user.id,
            username: user.username.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "aula_auth",
            "msg=\"signup success\" user_id={}",
            user.id
        );

        Ok((user, issued))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    fn action(repo: &InMemoryRepository) -> SignupAction<InMemoryRepository, InMemoryRepository> {
        SignupAction::new(repo.clone(), SessionAuthenticator::new(repo.clone()))
    }

    #[tokio::test]
    async fn test_signup_success() {
        let repo = InMemoryRepository::new();
        let signup = action(&repo);

        let password = SecretString::new("securepassword");
        let (user, issued) = signup.execute("alice", &password).await.unwrap();

        assert_eq!(user.username, "alice");
        assert_ne!(user.hashed_password, "securepassword");
        assert_eq!(issued.session.user_id, user.id);
        assert_eq!(repo.session_count(), 1);
    }

    #[tokio::test]
    async fn test_signup_duplicate_username() {
        let repo = InMemoryRepository::new();
        let signup = action(&repo);

        let password = SecretString::new("securepassword");
        signup.execute("alice", &password).await.unwrap();

        let result = signup.execute("alice", &password).await;
        assert_eq!(result.unwrap_err(), AuthError::UniqueViolation);

        // No second user row and no second session.
        assert_eq!(repo.user_count(), 1);
        assert_eq!(repo.session_count(), 1);
    }
}
