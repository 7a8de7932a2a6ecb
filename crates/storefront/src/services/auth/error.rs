//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during login and logout.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password was left empty.
    #[error("email and password are required")]
    MissingFields,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] shopfront_core::EmailError),

    /// Rejected by the auth endpoint, or the response had no token.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configured endpoint is not a valid URL.
    #[error("invalid auth endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Token could not be stored or cleared.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
