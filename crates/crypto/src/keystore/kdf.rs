//! Key Derivation Function (KDF) implementation
//!
//! scrypt with the light parameters used for exported validator keystores:
//! N=16384 (2^14), r=8, p=1. The derived key is 32 bytes: the first half keys
//! the cipher, the second half feeds the checksum.

use serde::{Deserialize, Serialize};

use super::error::{KeystoreError, KeystoreResult};
use crate::secure::{IntoSecret, SecretBytes};

pub const SCRYPT_N: u32 = 16384; // 2^14
pub const SCRYPT_R: u32 = 8; // block size
pub const SCRYPT_P: u32 = 1; // parallelization
pub const SCRYPT_DKLEN: usize = 32; // derived key length

/// Salt length in bytes
pub const SALT_LENGTH: usize = 32;

/// KDF module for EIP-2335 keystore
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KdfModule {
    /// KDF function identifier ("scrypt")
    pub function: String,
    /// KDF parameters
    pub params: KdfParams,
    /// Empty message field (required by EIP-2335 schema)
    pub message: String,
}

impl KdfModule {
    /// Create a new scrypt KDF module with the default parameters
    pub fn new_scrypt(salt: Vec<u8>) -> Self {
        Self {
            function: "scrypt".to_string(),
            params: KdfParams {
                dklen: SCRYPT_DKLEN as u32,
                n: SCRYPT_N,
                p: SCRYPT_P,
                r: SCRYPT_R,
                salt: hex::encode(&salt),
            },
            message: String::new(),
        }
    }

    /// Derive a key from the given password
    pub fn derive_key(&self, password: &str) -> KeystoreResult<SecretBytes> {
        self.params.derive_key(password)
    }
}

/// scrypt parameters
///
/// Field order matches the EIP-2335 examples: dklen, n, p, r, salt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KdfParams {
    /// Derived key length in bytes
    pub dklen: u32,
    /// CPU/memory cost parameter (must be power of 2)
    pub n: u32,
    /// Parallelization parameter
    pub p: u32,
    /// Block size parameter
    pub r: u32,
    /// Salt as hex string
    pub salt: String,
}

impl KdfParams {
    /// Validate the parameters and return the decoded salt
    pub fn validate(&self) -> KeystoreResult<Vec<u8>> {
        // the checksum needs derived_key[16..32]
        if self.dklen < 32 {
            return Err(KeystoreError::InvalidKdfParams(
                "dklen must be at least 32".to_string(),
            ));
        }
        if !self.n.is_power_of_two() || self.n < 2 {
            return Err(KeystoreError::InvalidKdfParams(
                "n must be a power of 2 greater than 1".to_string(),
            ));
        }
        if self.r == 0 {
            return Err(KeystoreError::InvalidKdfParams(
                "r must be positive".to_string(),
            ));
        }
        if self.p == 0 {
            return Err(KeystoreError::InvalidKdfParams(
                "p must be positive".to_string(),
            ));
        }
        hex::decode(&self.salt)
            .map_err(|e| KeystoreError::InvalidKdfParams(format!("invalid salt hex: {}", e)))
    }

    /// Run scrypt over `password`
    pub fn derive_key(&self, password: &str) -> KeystoreResult<SecretBytes> {
        let salt = self.validate()?;
        let log_n = self.n.trailing_zeros() as u8;

        let params = scrypt::Params::new(log_n, self.r, self.p, self.dklen as usize)
            .map_err(|e| KeystoreError::InvalidKdfParams(e.to_string()))?;

        let mut output = vec![0u8; self.dklen as usize];
        scrypt::scrypt(password.as_bytes(), &salt, &params, &mut output)
            .map_err(|e| KeystoreError::KdfError(e.to_string()))?;

        Ok(output.into_secret())
    }
}

/// Generate a random salt
pub fn generate_salt() -> Vec<u8> {
    use rand::RngCore;
    let mut salt = vec![0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}
