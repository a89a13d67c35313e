use chrono::Utc;

use crate::events::{AuthEvent, dispatch};
use crate::repository::{SessionRepository, UserRepository};
use crate::session::SessionAuthenticator;
use crate::AuthError;

/// Deletes a user account and every session it owns.
pub struct DeleteAccountAction<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    users: U,
    authenticator: SessionAuthenticator<S>,
}

impl<U: UserRepository, S: SessionRepository> DeleteAccountAction<U, S> {
    pub fn new(users: U, authenticator: SessionAuthenticator<S>) -> Self {
        Self {
            users,
            authenticator,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "delete_account", skip_all, err)
    )]
    pub async fn execute(&self, user_id: i64) -> Result<(), AuthError> {
        self.users.delete_user(user_id).await?;

        // Sessions go second: if the user delete failed nothing changed, and
        // a session-delete failure leaves only rows that can never validate
        // again (the owning user is gone).
        self.authenticator.invalidate_all_sessions(user_id).await?;

        dispatch(AuthEvent::UserDeleted {
            user_id,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "aula_auth",
            "msg=\"account deleted\" user_id={user_id}"
        );

        Ok(())
    }
}
