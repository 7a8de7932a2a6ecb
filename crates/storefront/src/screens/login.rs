//! Login screen.

use secrecy::SecretString;
use tracing::debug;

use crate::models::AccessToken;
use crate::services::auth::{AuthError, AuthSession};
use crate::storage::KeyValueStore;

/// Shown when either field is left empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in your information";

/// Shown for every other login failure.
pub const INCORRECT_CREDENTIALS_MESSAGE: &str = "Your email or password is incorrect";

/// Login form state.
#[derive(Debug, Default)]
pub struct LoginScreen {
    email: String,
    password: Option<SecretString>,
    error: Option<&'static str>,
}

impl LoginScreen {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the email field.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Update the password field.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Some(SecretString::from(password.into()));
    }

    /// Current email field contents.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Inline error text, if the last submit failed.
    #[must_use]
    pub const fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Submit the form.
    ///
    /// Clears the previous error, then either returns the new token or sets
    /// the inline error text and returns `None`.
    pub async fn submit<S: KeyValueStore>(&mut self, auth: &AuthSession<S>) -> Option<AccessToken> {
        self.error = None;

        let empty = SecretString::from(String::new());
        let password = self.password.as_ref().unwrap_or(&empty);

        match auth.login(&self.email, password).await {
            Ok(token) => {
                self.password = None;
                Some(token)
            }
            Err(e) => {
                debug!(error = %e, "Login failed");
                self.error = Some(message_for(&e));
                None
            }
        }
    }
}

/// Inline message for a failed login.
#[must_use]
pub fn message_for(error: &AuthError) -> &'static str {
    match error {
        AuthError::MissingFields => MISSING_FIELDS_MESSAGE,
        _ => INCORRECT_CREDENTIALS_MESSAGE,
    }
}
