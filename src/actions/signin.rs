use chrono::Utc;

use crate::crypto::{Argon2Hasher, PasswordHasher, SecretString};
use crate::events::{AuthEvent, dispatch};
use crate::repository::{AuthUser, SessionRepository, UserRepository};
use crate::session::{IssuedSession, SessionAuthenticator};
use crate::AuthError;

/// Verifies credentials and issues a new session.
pub struct SigninAction<U, S, H = Argon2Hasher>
where
    U: UserRepository,
    S: SessionRepository,
{
    users: U,
    authenticator: SessionAuthenticator<S>,
    hasher: H,
}

impl<U: UserRepository, S: SessionRepository> SigninAction<U, S, Argon2Hasher> {
    pub fn new(users: U, authenticator: SessionAuthenticator<S>) -> Self {
        Self {
            users,
            authenticator,
            hasher: Argon2Hasher::default(),
        }
    }
}

impl<U: UserRepository, S: SessionRepository, H: PasswordHasher> SigninAction<U, S, H> {
    pub fn with_hasher(users: U, authenticator: SessionAuthenticator<S>, hasher: H) -> Self {
        Self {
            users,
            authenticator,
            hasher,
        }
    }

    /// Signs a user in.
    ///
    /// An unknown username and a wrong password both yield
    /// `AuthError::InvalidCredentials`; the caller cannot tell which.
    /// Existing sessions are untouched; each sign-in adds one.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "signin", skip_all, err))]
    pub async fn execute(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<(AuthUser, IssuedSession), AuthError> {
        let user = self.users.find_user_by_username(username).await?;

        if let Some(user) = user {
            if self
                .hasher
                .verify(password.expose_secret(), &user.hashed_password)?
            {
                let issued = self.authenticator.start_session(user.id).await?;

                dispatch(AuthEvent::SigninSuccess {
                    user_id: user.id,
                    username: user.username.clone(),
                    at: Utc::now(),
                })
                .await;

                log::info!(
                    target: "aula_auth",
                    "msg=\"signin success\" user_id={}",
                    user.id
                );

                return Ok((user, issued));
            }
        }

        dispatch(AuthEvent::SigninFailed {
            username: username.to_owned(),
            at: Utc::now(),
        })
        .await;

        log::info!(target: "aula_auth", "msg=\"signin failed\"");

        Err(AuthError::InvalidCredentials)
    }
}
