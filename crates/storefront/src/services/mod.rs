//! Clients for the remote storefront services.
//!
//! # Services
//!
//! - `auth` - Email/password login and access-token persistence
//! - `catalog` - Product catalog feed

pub mod auth;
pub mod catalog;

pub use auth::{AuthClient, AuthError, AuthSession};
pub use catalog::{CatalogClient, CatalogError};

use std::time::Duration;

/// Build the HTTP client shared by every service.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}
