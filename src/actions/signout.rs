use chrono::Utc;

use crate::crypto::{SecretString, token_digest};
use crate::events::{AuthEvent, dispatch};
use crate::repository::SessionRepository;
use crate::AuthError;

/// Invalidates the session behind a presented token.
pub struct SignoutAction<S: SessionRepository> {
    sessions: S,
}

impl<S: SessionRepository> SignoutAction<S> {
    pub fn new(sessions: S) -> Self {
        SignoutAction { sessions }
    }

    /// Signs out by deleting the token's session row.
    ///
    /// Idempotent: a token whose session is already gone signs out
    /// successfully. The caller clears the cookie either way.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "signout", skip_all, err))]
    pub async fn execute(&self, token: &SecretString) -> Result<(), AuthError> {
        let session_id = token_digest(token.expose_secret());

        // Look up the owner first so the event can carry it.
        let found = self.sessions.find_session(&session_id).await?;

        self.sessions.delete_session(&session_id).await?;

        if let Some((session, _user)) = found {
            dispatch(AuthEvent::SignoutSuccess {
                user_id: session.user_id,
                at: Utc::now(),
            })
            .await;
        }

        log::info!(target: "aula_auth", "msg=\"signout success\"");

        Ok(())
    }
}
