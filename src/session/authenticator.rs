//! The session token lifecycle: issue, validate, renew, invalidate.

use chrono::Utc;

use crate::AuthError;
use crate::config::AuthConfig;
use crate::crypto::{SecretString, generate_token, token_digest};
use crate::events::{AuthEvent, dispatch};
use crate::repository::SessionRepository;

use super::{IssuedSession, Session, SessionValidation};

/// Manages bearer-token sessions without ever persisting a reversible secret.
///
/// The authenticator is stateless between calls; all durable state lives in
/// the [`SessionRepository`]. Each operation runs within one logical request.
///
/// A session record moves `nonexistent → active → deleted`, where deletion
/// comes from expiry detection, explicit invalidation, or bulk invalidation.
/// Renewal is the only self-loop: it resets the expiry clock and changes
/// nothing else.
pub struct SessionAuthenticator<R: SessionRepository> {
    sessions: R,
    config: AuthConfig,
}

impl<R: SessionRepository> SessionAuthenticator<R> {
    /// Creates an authenticator with the default 30-day TTL and 15-day
    /// renewal window.
    pub fn new(sessions: R) -> Self {
        Self::with_config(sessions, AuthConfig::default())
    }

    pub fn with_config(sessions: R, config: AuthConfig) -> Self {
        SessionAuthenticator { sessions, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Produces a fresh session token from a CSPRNG.
    ///
    /// Pure generation; nothing is persisted until [`create_session`]
    /// (or use [`start_session`] for both steps).
    ///
    /// [`create_session`]: Self::create_session
    /// [`start_session`]: Self::start_session
    pub fn generate_token(&self) -> SecretString {
        generate_token(self.config.token_length)
    }

    /// Persists a session for `token`, expiring a full TTL from now.
    ///
    /// Only the token's digest is written; the caller keeps the raw token
    /// for the cookie.
    ///
    /// # Errors
    ///
    /// `AuthError::StoreError` if the write fails. A duplicate digest is
    /// cryptographically negligible but surfaces rather than being ignored.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_session", skip_all, err)
    )]
    pub async fn create_session(
        &self,
        token: &SecretString,
        user_id: i64,
    ) -> Result<Session, AuthError> {
        let session = Session {
            id: token_digest(token.expose_secret()),
            user_id,
            expires_at: Utc::now() + self.config.session_ttl,
        };
        self.sessions.create_session(&session).await?;
        Ok(session)
    }

    /// Generates a token and persists its session in one step.
    pub async fn start_session(&self, user_id: i64) -> Result<IssuedSession, AuthError> {
        let token = self.generate_token();
        let session = self.create_session(&token, user_id).await?;
        Ok(IssuedSession { token, session })
    }

    /// Validates a presented token.
    ///
    /// Three outcomes:
    /// - the digest is unknown, or the session has expired: `Invalid`.
    ///   Expired rows are purged on the way out; a failed purge is logged
    ///   and swallowed because the negative result is already correct.
    /// - the session is inside its renewal window: the expiry is pushed to
    ///   `now + session_ttl` and persisted before returning
    ///   `Valid { renewed: true, .. }`.
    /// - otherwise: `Valid { renewed: false, .. }` with the row untouched.
    ///
    /// # Errors
    ///
    /// `AuthError::StoreError` on lookup failure, or if a renewal cannot be
    /// persisted (the stored session then keeps its prior, still-valid
    /// expiry).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "validate_token", skip_all, err)
    )]
    pub async fn validate_token(
        &self,
        token: &SecretString,
    ) -> Result<SessionValidation, AuthError> {
        let session_id = token_digest(token.expose_secret());

        let Some((mut session, user)) = self.sessions.find_session(&session_id).await? else {
            return Ok(SessionValidation::Invalid);
        };

        let now = Utc::now();

        if now >= session.expires_at {
            // The read already settled the answer; cleanup failure must not
            // turn a correct "no session" into an error.
            if let Err(err) = self.sessions.delete_session(&session_id).await {
                log::warn!(
                    target: "aula_auth::sessions",
                    "msg=\"failed to purge expired session\" user_id={} error=\"{err}\"",
                    session.user_id
                );
            }
            dispatch(AuthEvent::SessionExpired {
                user_id: session.user_id,
                at: now,
            })
            .await;
            return Ok(SessionValidation::Invalid);
        }

        let mut renewed = false;
        if now >= session.expires_at - self.config.renewal_window {
            let new_expiry = now + self.config.session_ttl;
            self.sessions.update_expiry(&session_id, new_expiry).await?;
            session.expires_at = new_expiry;
            renewed = true;
            dispatch(AuthEvent::SessionRenewed {
                user_id: session.user_id,
                at: now,
            })
            .await;
        }

        Ok(SessionValidation::Valid {
            session,
            user,
            renewed,
        })
    }

    /// Deletes one session by its digest id.
    ///
    /// Idempotent: an already-absent id is success.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "invalidate_session", skip_all, err)
    )]
    pub async fn invalidate_session(&self, session_id: &str) -> Result<(), AuthError> {
        self.sessions.delete_session(session_id).await
    }

    /// Deletes every session owned by `user_id`.
    ///
    /// Used by sign-out-everywhere and credential-change flows. Zero
    /// matching rows is success.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "invalidate_all_sessions", skip_all, err)
    )]
    pub async fn invalidate_all_sessions(&self, user_id: i64) -> Result<(), AuthError> {
        self.sessions.delete_user_sessions(user_id).await?;

        dispatch(AuthEvent::AllSessionsInvalidated {
            user_id,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}
