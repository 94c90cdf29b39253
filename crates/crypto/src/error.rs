//! Cryptographic error types

use thiserror::Error;

/// Errors raised by key derivation and public key computation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Integer does not fit in the requested number of octets
    #[error("integer does not fit in {length} bytes")]
    EncodingOverflow { length: usize },

    /// Seed has the wrong length
    #[error("invalid seed length: expected {expected}, got {actual}")]
    InvalidSeedLength { expected: usize, actual: usize },

    /// Secret key is zero or not below the subgroup order
    #[error("secret key out of range [1, r-1]")]
    InvalidSecretKey,

    /// Scalar multiplication or affine conversion hit the point at infinity
    #[error("point at infinity")]
    PointAtInfinity,

    /// HKDF expansion failed
    #[error("hkdf failure: {0}")]
    Hkdf(String),

    /// Malformed derivation path
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    /// Malformed public key encoding
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// Result type for key derivation operations
pub type CryptoResult<T> = Result<T, CryptoError>;
