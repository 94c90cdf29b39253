//! EIP-2335 keystore export
//!
//! Seals a validator secret key under a password:
//!
//! - scrypt KDF (N=16384, r=8, p=1) stretches the password
//! - AES-128-CTR encrypts the 32-byte key with the first half of the derived key
//! - SHA-256 over the second half and the ciphertext lets consumers detect a
//!   wrong password
//!
//! Keystores are built here and handed to validator clients; importing is
//! left to those clients.
//!
//! # Example
//!
//! ```rust,no_run
//! use vrun_crypto::keystore::KeystoreBuilder;
//! use vrun_crypto::SecretKey;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sk = SecretKey::from_bytes(&[0x2a; 32])?;
//! let generated = KeystoreBuilder::new(&sk)
//!     .path("m/12381/3600/0/0/0")
//!     .build()?;
//! println!("{}", generated.to_json()?);
//! # Ok(())
//! # }
//! ```

mod checksum;
mod cipher;
mod encrypted;
mod error;
mod kdf;
mod password;

pub use checksum::{compute_checksum, verify_checksum, ChecksumModule, ChecksumParams};
pub use cipher::{encrypt_secret, CipherModule, CipherParams, IV_LENGTH};
pub use encrypted::{CryptoModule, GeneratedKeystore, Keystore, KeystoreBuilder, KEYSTORE_VERSION};
pub use error::{KeystoreError, KeystoreResult};
pub use kdf::{KdfModule, KdfParams, SALT_LENGTH, SCRYPT_DKLEN, SCRYPT_N, SCRYPT_P, SCRYPT_R};
pub use password::{generate_password, is_excluded_code_unit, password_from_bytes};
