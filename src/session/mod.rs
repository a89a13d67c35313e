mod authenticator;
mod cookie;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use authenticator::SessionAuthenticator;
pub use cookie::{
    CookieConfig, SameSite, SetCookie, clear_logged_in_cookie, clear_session_cookie,
    issue_logged_in_cookie, issue_session_cookie,
};

use crate::AuthUser;
use crate::crypto::SecretString;

/// A session row.
///
/// `id` is the lowercase-hex SHA-256 digest of the client's token, never the
/// token itself. Possessing the token is proof of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// A freshly issued session together with its raw token.
///
/// This is the only place the raw token appears server-side; hand it to the
/// client as a cookie and drop it.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: SecretString,
    pub session: Session,
}

/// Outcome of validating a session token.
///
/// Callers treat renewed and as-is sessions identically except for cookie
/// re-issuance, which is what the `renewed` flag is for.
#[derive(Debug, Clone)]
pub enum SessionValidation {
    Valid {
        session: Session,
        user: AuthUser,
        /// True when this validation pushed `expires_at` forward.
        renewed: bool,
    },
    /// Digest not found, or the session had expired (and was purged).
    Invalid,
}

impl SessionValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionValidation::Valid { .. })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_session_not_expired() {
        let session = Session {
            id: "digest".to_owned(),
            user_id: 1,
            expires_at: Utc::now() + Duration::hours(1),
        };
        assert!(!session.is_expired());
    }

    #[test]
    fn test_session_expired() {
        let session = Session {
            id: "digest".to_owned(),
            user_id: 1,
            expires_at: Utc::now() - Duration::hours(1),
        };
        assert!(session.is_expired());
    }

    #[test]
    fn test_validation_is_valid() {
        assert!(!SessionValidation::Invalid.is_valid());
    }
}
