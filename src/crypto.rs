use crate::AuthError;
use argon2::{Argon2, PasswordVerifier};
use password_hash::{PasswordHash, PasswordHasher as ArgonPasswordHasher, SaltString};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// Default token length in characters.
///
/// Tokens are drawn from a 32-symbol alphabet (5 bits per character), so 32
/// characters carry 160 bits of entropy.
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Lowercase base32 alphabet (RFC 4648, no padding). Cookie-safe.
const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Carrier for raw session tokens and plaintext passwords.
///
/// Both `Debug` and `Display` print `[REDACTED]`, so a secret cannot end up
/// in a log line by accident. Serialization writes the real value: tokens
/// must reach the client in responses and cookies.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the wrapped value. Callers are the hashing and cookie paths;
    /// anything headed for a log keeps the wrapper.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString(s))
    }
}

/// Password hashing and verification, pluggable at the action seams.
///
/// The crate ships [`Argon2Hasher`]; tests that cannot afford real Argon2
/// work can substitute a cheap implementation.
pub trait PasswordHasher: Send + Sync {
    /// Hash a password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if hashing fails.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if the hash is malformed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Argon2id with the `argon2` crate's default parameters (19 MiB, t=2, p=1).
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        // Parameters come from the PHC string, so hashes written under older
        // settings still verify.
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashError)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Generates a cryptographically secure random session token.
///
/// Characters come from the lowercase base32 alphabet (a-z, 2-7), 5 bits of
/// entropy each, so the default 32-character token carries 160 bits. The
/// alphabet is cookie-safe and needs no padding or escaping.
///
/// # Example
///
/// ```rust
/// use aula_auth::crypto::generate_token;
///
/// let token = generate_token(32);
/// assert_eq!(token.expose_secret().len(), 32);
/// ```
pub fn generate_token(length: usize) -> SecretString {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let token: String = (0..length)
        .map(|_| char::from(TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())]))
        .collect();
    SecretString::new(token)
}

/// Generates a token with the default length (32 characters, 160 bits).
pub fn generate_token_default() -> SecretString {
    generate_token(DEFAULT_TOKEN_LENGTH)
}

/// Computes the storage id for a session token: lowercase-hex SHA-256.
///
/// Only this digest is ever persisted; the raw token exists in transit and
/// in the client's cookie store. Tokens are high-entropy random strings, so
/// a fast unsalted hash is appropriate (unlike passwords).
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}
