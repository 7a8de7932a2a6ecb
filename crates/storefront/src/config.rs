//! Storefront configuration.
//!
//! [`StorefrontConfig::default`] targets the production catalog and auth
//! endpoints. [`StorefrontConfig::from_env`] starts from those defaults and
//! applies any overrides found in the environment (or a `.env` file).
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPFRONT_STORAGE_DIR` - Directory of the durable store (default: `.shopfront`)
//! - `SHOPFRONT_CATALOG_URL` - Catalog endpoint
//! - `SHOPFRONT_CATALOG_CATEGORY` - Category path sent as the `url` query parameter
//! - `SHOPFRONT_CATALOG_SORT` - Sort key (default: `popular`)
//! - `SHOPFRONT_CATALOG_SORT_DIR` - Sort direction (default: `desc`)
//! - `SHOPFRONT_CATALOG_PAGE` - Page number (default: 1)
//! - `SHOPFRONT_CATALOG_LIMIT` - Page size (default: 20)
//! - `SHOPFRONT_AUTH_URL` - Login endpoint
//! - `SHOPFRONT_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_STORAGE_DIR: &str = ".shopfront";
const DEFAULT_CATALOG_URL: &str = "https://api.vendoo.ge/api/beta/catalog";
const DEFAULT_CATALOG_CATEGORY: &str = "technics/kompiuteruli-teqnika/noutbuqebi-da-misi-aqsesuarebi";
const DEFAULT_AUTH_URL: &str = "https://accounts.tnet.ge/api/ka/user/auth";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding the durable key-value store
    pub storage_dir: PathBuf,
    /// Catalog feed configuration
    pub catalog: CatalogConfig,
    /// Login endpoint configuration
    pub auth: AuthConfig,
    /// Timeout applied to every HTTP request
    pub http_timeout: Duration,
}

/// Catalog feed endpoint and fixed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog endpoint URL (without query string)
    pub endpoint: String,
    /// Category path
    pub category_path: String,
    /// Sort key
    pub sort: String,
    /// Sort direction
    pub sort_dir: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Products per page
    pub limit: u32,
}

/// Login endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Login endpoint URL
    pub endpoint: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            catalog: CatalogConfig::default(),
            auth: AuthConfig::default(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CATALOG_URL.to_string(),
            category_path: DEFAULT_CATALOG_CATEGORY.to_string(),
            sort: "popular".to_string(),
            sort_dir: "desc".to_string(),
            page: 1,
            limit: 20,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_AUTH_URL.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let catalog = CatalogConfig {
            endpoint: lookup("SHOPFRONT_CATALOG_URL").unwrap_or(defaults.catalog.endpoint),
            category_path: lookup("SHOPFRONT_CATALOG_CATEGORY")
                .unwrap_or(defaults.catalog.category_path),
            sort: lookup("SHOPFRONT_CATALOG_SORT").unwrap_or(defaults.catalog.sort),
            sort_dir: lookup("SHOPFRONT_CATALOG_SORT_DIR").unwrap_or(defaults.catalog.sort_dir),
            page: parse_or(&lookup, "SHOPFRONT_CATALOG_PAGE", defaults.catalog.page)?,
            limit: parse_or(&lookup, "SHOPFRONT_CATALOG_LIMIT", defaults.catalog.limit)?,
        };

        Ok(Self {
            storage_dir: lookup("SHOPFRONT_STORAGE_DIR")
                .map_or(defaults.storage_dir, PathBuf::from),
            catalog,
            auth: AuthConfig {
                endpoint: lookup("SHOPFRONT_AUTH_URL").unwrap_or(defaults.auth.endpoint),
            },
            http_timeout: Duration::from_secs(parse_or(
                &lookup,
                "SHOPFRONT_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
