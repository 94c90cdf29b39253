//! EIP-2334 derivation paths for validator keys
//!
//! ```text
//! m / 12381 / 3600 / index / 0        withdrawal key
//! m / 12381 / 3600 / index / 0 / 0    signing key
//! ```
//!
//! Where:
//! - `12381` = purpose, the BLS12-381 curve identifier
//! - `3600` = coin type for Ethereum staking
//! - `index` = validator index within the account
//!
//! Callers deriving many indices under one seed should compute
//! [`prefix_key`] once and pass it as [`KeySource::PrefixKey`].

use crate::error::{CryptoError, CryptoResult};
use crate::keys::{SecretKey, ValidatorKeys};
use crate::secure::Seed;
use crate::tree::{derive_child, secret_key_from_seed};

/// Purpose level, the BLS12-381 curve identifier
pub const PURPOSE: u32 = 12381;

/// Coin type for Ethereum staking keys
pub const COIN_TYPE: u32 = 3600;

/// Where validator key derivation starts
#[derive(Debug, Clone, Copy)]
pub enum KeySource<'a> {
    /// Account seed; the prefix key is derived on every call
    Seed(&'a Seed),
    /// Precomputed key at `m/12381/3600`
    PrefixKey(&'a SecretKey),
}

/// Derivation paths for one validator index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorPaths {
    /// `m/12381/3600/{index}/0`
    pub withdrawal: String,
    /// `m/12381/3600/{index}/0/0`
    pub signing: String,
}

impl ValidatorPaths {
    /// Paths for the validator at `index`
    pub fn new(index: u32) -> Self {
        let withdrawal = format!("m/{}/{}/{}/0", PURPOSE, COIN_TYPE, index);
        let signing = format!("{}/0", withdrawal);
        Self {
            withdrawal,
            signing,
        }
    }
}

/// Derive the key at `m/12381/3600`
pub fn prefix_key(seed: &Seed) -> CryptoResult<SecretKey> {
    let master = secret_key_from_seed(seed.expose_secret())?;
    let purpose = derive_child(&master, PURPOSE)?;
    derive_child(&purpose, COIN_TYPE)
}

/// Derive the withdrawal and signing keys of validator `index`
pub fn validator_keys(source: KeySource<'_>, index: u32) -> CryptoResult<ValidatorKeys> {
    let owned;
    let prefix = match source {
        KeySource::Seed(seed) => {
            owned = prefix_key(seed)?;
            &owned
        }
        KeySource::PrefixKey(key) => key,
    };

    let index_key = derive_child(prefix, index)?;
    let withdrawal = derive_child(&index_key, 0)?;
    let signing = derive_child(&withdrawal, 0)?;

    Ok(ValidatorKeys {
        withdrawal,
        signing,
    })
}

/// Parse an EIP-2334 path such as `m/12381/3600/0/0/0`
///
/// EIP-2334 has no hardened derivation, so `'` or `h` suffixes are rejected.
pub fn parse_path(path: &str) -> CryptoResult<Vec<u32>> {
    let mut parts = path.trim().split('/');

    if parts.next() != Some("m") {
        return Err(CryptoError::InvalidPath(
            "path must start with 'm'".to_string(),
        ));
    }

    let components = parts
        .map(|part| {
            part.parse::<u32>()
                .map_err(|_| CryptoError::InvalidPath(format!("invalid path component: {}", part)))
        })
        .collect::<CryptoResult<Vec<_>>>()?;

    if components.is_empty() {
        return Err(CryptoError::InvalidPath(
            "path has no components".to_string(),
        ));
    }

    Ok(components)
}

/// Derive the key at an arbitrary path below the seed's master key
pub fn derive_path(seed: &Seed, path: &str) -> CryptoResult<SecretKey> {
    let components = parse_path(path)?;

    let mut key = secret_key_from_seed(seed.expose_secret())?;
    for index in components {
        key = derive_child(&key, index)?;
    }
    Ok(key)
}
