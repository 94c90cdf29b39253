//! AES-128-CTR encryption of the secret key
//!
//! The cipher key is the first 16 bytes of the scrypt output. CTR needs no
//! padding, so the message is exactly as long as the 32-byte secret.

use aes::Aes128;
use cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use serde::{Deserialize, Serialize};

use super::error::{KeystoreError, KeystoreResult};

/// IV length for AES-128-CTR
pub const IV_LENGTH: usize = 16;

/// AES-128 key length
pub const AES_KEY_LENGTH: usize = 16;

type Aes128Ctr = Ctr128BE<Aes128>;

/// Cipher module for EIP-2335 keystore
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CipherModule {
    /// Cipher function identifier ("aes-128-ctr")
    pub function: String,
    /// Cipher parameters
    pub params: CipherParams,
    /// Encrypted secret key as hex string
    pub message: String,
}

impl CipherModule {
    /// Create a new AES-128-CTR cipher module
    pub fn new(iv: &[u8], ciphertext: &[u8]) -> Self {
        Self {
            function: "aes-128-ctr".to_string(),
            params: CipherParams {
                iv: hex::encode(iv),
            },
            message: hex::encode(ciphertext),
        }
    }

    /// IV bytes
    pub fn iv(&self) -> KeystoreResult<Vec<u8>> {
        hex::decode(&self.params.iv)
            .map_err(|e| KeystoreError::HexError(format!("invalid IV hex: {}", e)))
    }

    /// Ciphertext bytes
    pub fn ciphertext(&self) -> KeystoreResult<Vec<u8>> {
        hex::decode(&self.message)
            .map_err(|e| KeystoreError::HexError(format!("invalid ciphertext hex: {}", e)))
    }
}

/// Cipher parameters for AES-128-CTR
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CipherParams {
    /// Initialization vector as hex string
    pub iv: String,
}

/// Apply the AES-128-CTR keystream to `secret`
///
/// Only the first 16 bytes of `derived_key` are used. Applying the keystream
/// twice with the same key and IV yields the input again.
pub fn encrypt_secret(secret: &[u8], derived_key: &[u8], iv: &[u8]) -> KeystoreResult<Vec<u8>> {
    if derived_key.len() < AES_KEY_LENGTH {
        return Err(KeystoreError::InvalidCipherParams(format!(
            "encryption key must be at least {} bytes, got {}",
            AES_KEY_LENGTH,
            derived_key.len()
        )));
    }

    let iv: [u8; IV_LENGTH] = iv.try_into().map_err(|_| {
        KeystoreError::InvalidCipherParams(format!(
            "IV must be {} bytes, got {}",
            IV_LENGTH,
            iv.len()
        ))
    })?;

    let key: [u8; AES_KEY_LENGTH] = derived_key[..AES_KEY_LENGTH]
        .try_into()
        .map_err(|_| KeystoreError::CipherError("key conversion failed".to_string()))?;

    let mut cipher = Aes128Ctr::new(&key.into(), &iv.into());
    let mut ciphertext = secret.to_vec();
    cipher.apply_keystream(&mut ciphertext);

    Ok(ciphertext)
}

/// Generate a random IV
pub fn generate_iv() -> Vec<u8> {
    use rand::RngCore;
    let mut iv = vec![0u8; IV_LENGTH];
    rand::thread_rng().fill_bytes(&mut iv);
    iv
}
