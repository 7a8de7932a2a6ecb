//! Durable key-value storage.
//!
//! The storefront persists exactly two values across restarts: the cart
//! snapshot and the access token. Both live in a string-keyed store behind
//! the [`KeyValueStore`] trait so the cart and auth code never touch the
//! filesystem directly.
//!
//! # Backends
//!
//! - [`FileStore`] - one file per key in a directory, atomic writes
//! - [`MemoryStore`] - in-process map for tests and ephemeral sessions

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;

/// Keys used in the durable store.
pub mod keys {
    /// JSON-serialized cart snapshot.
    pub const CART: &str = "cart";

    /// Plain-string access token returned by the auth endpoint.
    pub const ACCESS_TOKEN: &str = "accessToken";
}

/// Errors that can occur when reading or writing the durable store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot be used as a slot name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A persistent, string-keyed store of string values.
///
/// Every `set` replaces the whole value under the key.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete the value under `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Check that a key is usable as a slot name on every backend.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
