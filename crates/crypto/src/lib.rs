//! BLS12-381 validator key derivation for vrun
//!
//! This crate provides:
//! - Prime field and G1 curve arithmetic over arbitrary-precision integers
//! - EIP-2333 key tree (master key from seed, Lamport child derivation)
//! - EIP-2334 validator paths (`m/12381/3600/{index}/0[/0]`)
//! - Compressed public key encoding
//! - EIP-2335 keystore export with generated passwords
//!
//! Secret keys are zeroized on drop and never printed.

pub mod curve;
pub mod error;
pub mod field;
pub mod keys;
pub mod keystore;
pub mod path;
pub mod pubkey;
pub mod secure;
pub mod tree;

// Key tree exports
pub use tree::{derive_child, integer_to_octets, octets_to_integer, secret_key_from_seed};

// Path exports
pub use path::{derive_path, prefix_key, validator_keys, KeySource, ValidatorPaths};

// Key exports
pub use keys::{SecretKey, ValidatorKeys};
pub use pubkey::{pubkey_from_privkey, PublicKey};

// Error exports
pub use error::{CryptoError, CryptoResult};

// Secure memory exports
pub use secure::{ExposeSecret, IntoSecret, SecretBytes, SecretString, Seed, SEED_SIZE};

// Keystore exports
pub use keystore::{GeneratedKeystore, Keystore, KeystoreBuilder, KeystoreError};
