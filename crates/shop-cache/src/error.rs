//! Cache error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store {path}: {source}")]
    OpenError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to write the store back to disk.
    #[error("Store write failed for {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a JSON object.
    #[error("Corrupt store {0}: expected a JSON object")]
    Corrupt(PathBuf),
}
