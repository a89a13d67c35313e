//! Cookie-session authentication core for the Aula classroom backend.
//!
//! Clients hold an opaque high-entropy token in a `session` cookie; the
//! server stores only the SHA-256 digest of that token, keyed as the session
//! id. Validation looks the digest up, purges expired rows, and extends the
//! expiry once a session enters its renewal window. A leaked session table
//! therefore never leaks usable tokens.
//!
//! The crate is storage-agnostic: implement [`UserRepository`] and
//! [`SessionRepository`] for your database, or use the bundled
//! [`InMemoryRepository`] for tests and single-instance deployments.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use aula_auth::{InMemoryRepository, SecretString, SessionAuthenticator};
//! use aula_auth::actions::SignupAction;
//!
//! let store = InMemoryRepository::new();
//! let authenticator = SessionAuthenticator::new(store.clone());
//!
//! let signup = SignupAction::new(store.clone(), SessionAuthenticator::new(store.clone()));
//! let (user, issued) = signup
//!     .execute("alice", &SecretString::new("correct horse battery staple"))
//!     .await?;
//!
//! // hand `issued.token` back to the client as a cookie,
//! // validate it on subsequent requests:
//! let outcome = authenticator.validate_token(&issued.token).await?;
//! ```

pub mod actions;
pub mod config;
pub mod crypto;
pub mod events;
pub mod repository;
pub mod session;

use std::fmt;

pub use config::AuthConfig;
pub use crypto::{Argon2Hasher, PasswordHasher, SecretString};
pub use events::register_event_listeners;
pub use repository::{AuthUser, InMemoryRepository, SessionRepository, UserRepository};
pub use session::{
    CookieConfig, IssuedSession, SameSite, Session, SessionAuthenticator, SessionValidation,
    SetCookie,
};

/// Failure kinds surfaced by authentication operations.
///
/// An unknown or expired session token is *not* an error: validation reports
/// it as [`SessionValidation::Invalid`], a normal negative result. This enum
/// only covers failures the caller must act on.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// No user with the given id exists.
    UserNotFound,
    /// Username/password pair did not match. Deliberately does not reveal
    /// whether the username exists.
    InvalidCredentials,
    /// The identifying credential field (username) is already taken.
    UniqueViolation,
    /// Password hashing or hash parsing failed.
    PasswordHashError,
    /// The underlying store failed. Deleting an already-absent row is not a
    /// store error; repositories report that as success.
    StoreError(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthError::UniqueViolation => write!(f, "Username is already taken"),
            AuthError::PasswordHashError => write!(f, "Failed to hash password"),
            AuthError::StoreError(msg) => write!(f, "Store error: {}", msg),
        }
    }
}
