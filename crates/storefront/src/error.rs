//! Unified error handling.
//!
//! Each component reports its own error type; [`AppError`] aggregates them
//! for callers that drive the whole storefront. Screens and the cart store
//! degrade to safe defaults instead of returning most of these.

use thiserror::Error;

use crate::config::ConfigError;
use crate::navigation::NavigationError;
use crate::services::auth::AuthError;
use crate::services::catalog::CatalogError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Durable storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog fetch failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Transition not allowed from the current screen.
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
