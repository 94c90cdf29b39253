//! Keystore error types

use thiserror::Error;

use crate::error::CryptoError;

/// Errors that can occur while building a keystore
#[derive(Error, Debug)]
pub enum KeystoreError {
    /// Checksum verification failed (wrong password or corrupted keystore)
    #[error("checksum verification failed: keystore may be corrupted")]
    ChecksumMismatch,

    /// Invalid KDF parameters
    #[error("invalid KDF parameters: {0}")]
    InvalidKdfParams(String),

    /// Invalid cipher parameters
    #[error("invalid cipher parameters: {0}")]
    InvalidCipherParams(String),

    /// Key derivation failed
    #[error("key derivation failed: {0}")]
    KdfError(String),

    /// Encryption failed
    #[error("cipher operation failed: {0}")]
    CipherError(String),

    /// Invalid hex encoding
    #[error("invalid hex encoding: {0}")]
    HexError(String),

    /// Public key computation failed
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for keystore operations
pub type KeystoreResult<T> = Result<T, KeystoreError>;
