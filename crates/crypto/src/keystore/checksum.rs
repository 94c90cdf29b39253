//! SHA-256 checksum over `derived_key[16..32] || ciphertext`
//!
//! Lets a consumer detect a wrong password before decrypting.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::{KeystoreError, KeystoreResult};
use crate::secure::constant_time_eq;

/// Checksum module for EIP-2335 keystore
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecksumModule {
    /// Checksum function identifier ("sha256")
    pub function: String,
    /// Always empty for sha256
    pub params: ChecksumParams,
    /// Checksum value as hex string
    pub message: String,
}

impl ChecksumModule {
    /// Create a new SHA-256 checksum module
    pub fn new(checksum: &[u8]) -> Self {
        Self {
            function: "sha256".to_string(),
            params: ChecksumParams {},
            message: hex::encode(checksum),
        }
    }

    /// Checksum bytes
    pub fn checksum(&self) -> KeystoreResult<Vec<u8>> {
        hex::decode(&self.message)
            .map_err(|e| KeystoreError::HexError(format!("invalid checksum hex: {}", e)))
    }

    /// Check the stored checksum against `derived_key` and `ciphertext`
    pub fn verify(&self, derived_key: &[u8], ciphertext: &[u8]) -> KeystoreResult<()> {
        verify_checksum(derived_key, ciphertext, &self.checksum()?)
    }
}

/// Empty params object, serialized as `{}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChecksumParams {}

/// Compute `SHA256(derived_key[16..32] || ciphertext)`
pub fn compute_checksum(derived_key: &[u8], ciphertext: &[u8]) -> KeystoreResult<Vec<u8>> {
    if derived_key.len() < 32 {
        return Err(KeystoreError::InvalidKdfParams(format!(
            "derived key must be at least 32 bytes, got {}",
            derived_key.len()
        )));
    }

    let mut hasher = Sha256::new();
    hasher.update(&derived_key[16..32]);
    hasher.update(ciphertext);

    Ok(hasher.finalize().to_vec())
}

/// Verify a checksum, failing with [`KeystoreError::ChecksumMismatch`]
pub fn verify_checksum(
    derived_key: &[u8],
    ciphertext: &[u8],
    expected: &[u8],
) -> KeystoreResult<()> {
    let computed = compute_checksum(derived_key, ciphertext)?;

    if constant_time_eq(&computed, expected) {
        Ok(())
    } else {
        Err(KeystoreError::ChecksumMismatch)
    }
}
