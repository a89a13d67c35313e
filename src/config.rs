//! Session lifetime configuration.
//!
//! The defaults match the deployed classroom backend: sessions live 30 days
//! and get renewed once less than half their lifetime remains. Both knobs
//! are independent; only keep `renewal_window <= session_ttl`.

use chrono::Duration;

use crate::crypto::DEFAULT_TOKEN_LENGTH;

/// Configuration for the session authenticator.
///
/// # Example
///
/// ```rust
/// use aula_auth::AuthConfig;
/// use chrono::Duration;
///
/// // Defaults: 30-day sessions, renewed in the last 15 days of life.
/// let config = AuthConfig::default();
///
/// // Or customize:
/// let config = AuthConfig {
///     session_ttl: Duration::days(7),
///     renewal_window: Duration::days(3),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Absolute lifetime assigned to a session at creation or renewal.
    ///
    /// Default: 30 days
    pub session_ttl: Duration,

    /// Trailing portion of a session's life during which a successful
    /// validation resets the expiry to `now + session_ttl`.
    ///
    /// Default: 15 days (renew once less than half the TTL remains)
    pub renewal_window: Duration,

    /// Length of generated session tokens, in characters.
    ///
    /// Tokens use a 32-symbol alphabet, so the default of 32 characters
    /// carries 160 bits of entropy. Minimum accepted is 32.
    pub token_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::days(30),
            renewal_window: Duration::days(15),
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

impl AuthConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration suitable for development/testing.
    ///
    /// Short-lived sessions make expiry and renewal observable.
    pub fn development() -> Self {
        Self {
            session_ttl: Duration::hours(24),
            renewal_window: Duration::hours(12),
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated constraint.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.session_ttl <= Duration::zero() {
            return Err("session_ttl must be positive");
        }
        if self.renewal_window < Duration::zero() {
            return Err("renewal_window must not be negative");
        }
        if self.renewal_window > self.session_ttl {
            return Err("renewal_window must not exceed session_ttl");
        }
        if self.token_length < DEFAULT_TOKEN_LENGTH {
            return Err("token_length must be at least 32 characters (160 bits)");
        }
        Ok(())
    }
}
