//! Session-related types.
//!
//! The access token returned by the login endpoint, held as a secret so it
//! never shows up in logs or `Debug` output.

use secrecy::{ExposeSecret, SecretString};

/// Bearer token identifying a logged-in user.
///
/// The token is opaque to the storefront: it has no known expiry and is
/// never refreshed.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Returns the raw token for persisting or sending.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}
