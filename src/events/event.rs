use chrono::{DateTime, Utc};

/// Authentication events emitted by actions and the session authenticator.
///
/// Events are always fired; without registered listeners they are silently
/// ignored. Register listeners via
/// [`register_event_listeners`](crate::register_event_listeners).
#[derive(Debug, Clone)]
pub enum AuthEvent {
    // user lifecycle
    UserRegistered {
        user_id: i64,
        username: String,
        at: DateTime<Utc>,
    },
    UserDeleted {
        user_id: i64,
        at: DateTime<Utc>,
    },

    // authentication
    SigninSuccess {
        user_id: i64,
        username: String,
        at: DateTime<Utc>,
    },
    SigninFailed {
        username: String,
        at: DateTime<Utc>,
    },
    SignoutSuccess {
        user_id: i64,
        at: DateTime<Utc>,
    },

    // session lifecycle
    SessionRenewed {
        user_id: i64,
        at: DateTime<Utc>,
    },
    SessionExpired {
        user_id: i64,
        at: DateTime<Utc>,
    },
    AllSessionsInvalidated {
        user_id: i64,
        at: DateTime<Utc>,
    },

    // credentials
    PasswordChanged {
        user_id: i64,
        at: DateTime<Utc>,
    },
}

impl AuthEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user.registered",
            Self::UserDeleted { .. } => "user.deleted",
            Self::SigninSuccess { .. } => "auth.signin.success",
            Self::SigninFailed { .. } => "auth.signin.failed",
            Self::SignoutSuccess { .. } => "auth.signout.success",
            Self::SessionRenewed { .. } => "session.renewed",
            Self::SessionExpired { .. } => "session.expired",
            Self::AllSessionsInvalidated { .. } => "session.all_invalidated",
            Self::PasswordChanged { .. } => "auth.password.changed",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::UserRegistered { at, .. }
            | Self::UserDeleted { at, .. }
            | Self::SigninSuccess { at, .. }
            | Self::SigninFailed { at, .. }
            | Self::SignoutSuccess { at, .. }
            | Self::SessionRenewed { at, .. }
            | Self::SessionExpired { at, .. }
            | Self::AllSessionsInvalidated { at, .. }
            | Self::PasswordChanged { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            AuthEvent::UserRegistered {
                user_id: 1,
                username: "alice".to_owned(),
                at: now
            }
            .name(),
            "user.registered"
        );

        assert_eq!(
            AuthEvent::SigninFailed {
                username: "alice".to_owned(),
                at: now
            }
            .name(),
            "auth.signin.failed"
        );

        assert_eq!(
            AuthEvent::SessionRenewed {
                user_id: 1,
                at: now
            }
            .name(),
            "session.renewed"
        );

        assert_eq!(
            AuthEvent::AllSessionsInvalidated {
                user_id: 1,
                at: now
            }
            .name(),
            "session.all_invalidated"
        );
    }

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();
        let event = AuthEvent::SigninSuccess {
            user_id: 1,
            username: "alice".to_owned(),
            at: now,
        };
        assert_eq!(event.timestamp(), now);
    }
}
