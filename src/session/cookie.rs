//! Cookie issuance for session tokens.
//!
//! The raw token travels to the client in an HttpOnly `session` cookie
//! scoped to `/`, expiring alongside the session row. A non-HttpOnly
//! `loggedIn` companion cookie lets the frontend detect login state without
//! being able to read the token.

use chrono::{DateTime, Utc};

use crate::crypto::SecretString;

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

impl SameSite {
    fn as_str(self) -> &'static str {
        match self {
            SameSite::None => "None",
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
        }
    }
}

/// Cookie scoping attributes shared by issue and clear.
///
/// `secure` defaults to true; disable it only in non-production
/// environments without TLS.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_owned(),
            path: "/".to_owned(),
            domain: None,
            secure: true,
            same_site: SameSite::Lax,
        }
    }
}

impl CookieConfig {
    /// Configuration for local development over plain HTTP.
    pub fn development() -> Self {
        Self {
            secure: false,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CookieExpiry {
    /// `Expires=<timestamp>`
    At(DateTime<Utc>),
    /// `Max-Age=0`: the client discards the cookie immediately.
    Clear,
}

/// A single `Set-Cookie` header, ready for rendering.
#[derive(Debug, Clone)]
pub struct SetCookie {
    name: String,
    value: String,
    path: String,
    domain: Option<String>,
    secure: bool,
    http_only: bool,
    same_site: SameSite,
    expiry: CookieExpiry,
}

impl SetCookie {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the `Set-Cookie` header value.
    pub fn header_value(&self) -> String {
        let mut header = format!("{}={}", self.name, self.value);
        header.push_str("; Path=");
        header.push_str(&self.path);
        if let Some(domain) = &self.domain {
            header.push_str("; Domain=");
            header.push_str(domain);
        }
        match &self.expiry {
            CookieExpiry::At(expires_at) => {
                header.push_str("; Expires=");
                header.push_str(&expires_at.format("%a, %d %b %Y %H:%M:%S GMT").to_string());
            }
            CookieExpiry::Clear => header.push_str("; Max-Age=0"),
        }
        header.push_str("; SameSite=");
        header.push_str(self.same_site.as_str());
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

/// Builds the `session` cookie carrying the raw token.
pub fn issue_session_cookie(
    config: &CookieConfig,
    token: &SecretString,
    expires_at: DateTime<Utc>,
) -> SetCookie {
    SetCookie {
        name: config.name.clone(),
        value: token.expose_secret().to_owned(),
        path: config.path.clone(),
        domain: config.domain.clone(),
        secure: config.secure,
        http_only: true,
        same_site: config.same_site,
        expiry: CookieExpiry::At(expires_at),
    }
}

/// Builds the clearing counterpart of the session cookie (`Max-Age=0`,
/// same scoping attributes).
pub fn clear_session_cookie(config: &CookieConfig) -> SetCookie {
    SetCookie {
        name: config.name.clone(),
        value: String::new(),
        path: config.path.clone(),
        domain: config.domain.clone(),
        secure: config.secure,
        http_only: true,
        same_site: config.same_site,
        expiry: CookieExpiry::Clear,
    }
}

/// Builds the frontend-visible `loggedIn=true` companion cookie.
pub fn issue_logged_in_cookie(config: &CookieConfig, expires_at: DateTime<Utc>) -> SetCookie {
    SetCookie {
        name: "loggedIn".to_owned(),
        value: "true".to_owned(),
        path: config.path.clone(),
        domain: config.domain.clone(),
        secure: config.secure,
        http_only: false,
        same_site: config.same_site,
        expiry: CookieExpiry::At(expires_at),
    }
}

/// Builds the clearing counterpart of the `loggedIn` cookie.
pub fn clear_logged_in_cookie(config: &CookieConfig) -> SetCookie {
    SetCookie {
        name: "loggedIn".to_owned(),
        value: String::new(),
        path: config.path.clone(),
        domain: config.domain.clone(),
        secure: config.secure,
        http_only: false,
        same_site: config.same_site,
        expiry: CookieExpiry::Clear,
    }
}
