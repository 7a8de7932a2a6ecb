//! Authentication service.
//!
//! Email/password login against the remote auth endpoint, with the returned
//! access token kept in the durable store under
//! [`keys::ACCESS_TOKEN`](crate::storage::keys::ACCESS_TOKEN).

mod error;

pub use error::AuthError;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shopfront_core::Email;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::AuthConfig;
use crate::models::AccessToken;
use crate::storage::{KeyValueStore, keys};

/// Login request body.
#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    data: LoginData,
}

#[derive(Deserialize)]
struct LoginData {
    access_token: String,
}

/// Client for the login endpoint.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl AuthClient {
    /// Create a new auth client.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL.
    pub fn new(config: &AuthConfig, client: reqwest::Client) -> Result<Self, AuthError> {
        Ok(Self {
            client,
            endpoint: Url::parse(&config.endpoint)?,
        })
    }

    /// Exchange credentials for an access token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for any non-success status or a
    /// response without `data.access_token`, and `AuthError::Http` when the
    /// request cannot be sent.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AccessToken, AuthError> {
        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            debug!(status = %status, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let text = response.text().await?;
        let parsed: LoginResponse = serde_json::from_str(&text).map_err(|e| {
            debug!(error = %e, "Login response has no access token");
            AuthError::InvalidCredentials
        })?;

        Ok(AccessToken::new(parsed.data.access_token))
    }
}

/// Login state backed by the durable store.
pub struct AuthSession<S> {
    client: AuthClient,
    store: Arc<S>,
}

impl<S: KeyValueStore> AuthSession<S> {
    /// Create a session using `client` and persisting to `store`.
    #[must_use]
    pub const fn new(client: AuthClient, store: Arc<S>) -> Self {
        Self { client, store }
    }

    /// Validate the form input, log in and persist the token.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingFields` if either field is empty (no request is made)
    /// - `AuthError::InvalidEmail` if the email is malformed (no request is made)
    /// - any error from [`AuthClient::login`] or from storing the token
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AccessToken, AuthError> {
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(AuthError::MissingFields);
        }

        let email = Email::parse(email)?;
        let token = self.client.login(&email, password).await?;

        self.store.set(keys::ACCESS_TOKEN, token.expose()).await?;
        info!(email = %email, "Logged in");

        Ok(token)
    }

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token could not be removed from storage.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(keys::ACCESS_TOKEN).await?;
        info!("Logged out");
        Ok(())
    }

    /// The token persisted by the last successful login, if any.
    pub async fn stored_token(&self) -> Option<AccessToken> {
        match self.store.get(keys::ACCESS_TOKEN).await {
            Ok(token) => token.map(AccessToken::new),
            Err(e) => {
                warn!(error = %e, "Failed to read stored access token");
                None
            }
        }
    }
}
