//! Storage error types

use std::path::PathBuf;

use thiserror::Error;
use vrun_crypto::CryptoError;

/// Account store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Account directory or seed missing
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// No log exists for this pubkey under the account
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A create-once file is already present
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Log file content does not follow the log format
    #[error("malformed log {}: {reason}", path.display())]
    MalformedLog { path: PathBuf, reason: String },

    /// Seed file is not 32 bytes
    #[error("seed file has {0} bytes, expected 32")]
    InvalidSeedLength(usize),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key derivation or encoding error
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
