//! Run periodically (e.g., via cron) to clean up expired sessions and
//! prevent unbounded table growth. The validate path only purges rows it
//! happens to touch; this sweeps the rest.

use crate::repository::SessionRepository;
use crate::AuthError;

pub struct PruneSessionsAction<S: SessionRepository> {
    sessions: S,
}

impl<S: SessionRepository> PruneSessionsAction<S> {
    pub fn new(sessions: S) -> Self {
        Self { sessions }
    }

    /// Removes all expired session rows.
    ///
    /// # Returns
    ///
    /// The number of rows pruned.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "prune_sessions", skip(self))
    )]
    pub async fn execute(&self) -> Result<u64, AuthError> {
        let pruned = self.sessions.prune_expired().await?;

        log::info!(
            target: "aula_auth",
            "msg=\"sessions pruned\" count={pruned}"
        );

        Ok(pruned)
    }
}
