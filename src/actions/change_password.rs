use chrono::Utc;

use crate::crypto::{Argon2Hasher, PasswordHasher, SecretString};
use crate::events::{AuthEvent, dispatch};
use crate::repository::{SessionRepository, UserRepository};
use crate::session::SessionAuthenticator;
use crate::AuthError;

/// Replaces a user's password and invalidates all their sessions.
///
/// Every device holding an old session has to sign in again with the new
/// password.
pub struct ChangePasswordAction<U, S, H = Argon2Hasher>
where
    U: UserRepository,
    S: SessionRepository,
{
    users: U,
    authenticator: SessionAuthenticator<S>,
    hasher: H,
}

impl<U: UserRepository, S: SessionRepository> ChangePasswordAction<U, S, Argon2Hasher> {
    pub fn new(users: U, authenticator: SessionAuthenticator<S>) -> Self {
        Self {
            users,
            authenticator,
            hasher: Argon2Hasher::default(),
        }
    }
}

impl<U: UserRepository, S: SessionRepository, H: PasswordHasher> ChangePasswordAction<U, S, H> {
    pub fn with_hasher(users: U, authenticator: SessionAuthenticator<S>, hasher: H) -> Self {
        Self {
            users,
            authenticator,
            hasher,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "change_password", skip_all, err)
    )]
    pub async fn execute(
        &self,
        user_id: i64,
        current_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), AuthError> {
        let user = self.users.find_user_by_id(user_id).await?;

        let Some(user) = user else {
            return Err(AuthError::UserNotFound);
        };

        if !self
            .hasher
            .verify(current_password.expose_secret(), &user.hashed_password)?
        {
            return Err(AuthError::InvalidCredentials);
        }

        let hashed = self.hasher.hash(new_password.expose_secret())?;
        self.users.update_password(user_id, &hashed).await?;

        self.authenticator.invalidate_all_sessions(user_id).await?;

        dispatch(AuthEvent::PasswordChanged {
            user_id,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "aula_auth",
            "msg=\"password changed\" user_id={user_id}"
        );

        Ok(())
    }
}
