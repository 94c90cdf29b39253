//! BLS12-381 secret keys and the per-validator key pair
//!
//! Every validator slot owns two keys on the EIP-2334 tree:
//! - withdrawal key: `m/12381/3600/{index}/0`
//! - signing key: `m/12381/3600/{index}/0/0`
//!
//! Neither is ever persisted; both are re-derived from the account seed.

use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, CryptoResult};
use crate::field::SCALAR_FIELD;
use crate::pubkey::{pubkey_from_privkey, PublicKey};
use crate::secure::constant_time_eq;
use crate::tree::{integer_to_octets, octets_to_integer};

/// Secret key length in bytes
pub const SECRET_KEY_SIZE: usize = 32;

/// BLS12-381 secret key, an integer in `[1, r-1]`
///
/// Stored as 32 big-endian bytes and zeroized on drop. Not `Clone`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; SECRET_KEY_SIZE],
}

impl SecretKey {
    /// Build a secret key from an integer, rejecting `0` and values `>= r`
    pub fn from_biguint(n: &BigUint) -> CryptoResult<Self> {
        if n.is_zero() || n >= SCALAR_FIELD.modulus() {
            return Err(CryptoError::InvalidSecretKey);
        }
        let octets = integer_to_octets(n, SECRET_KEY_SIZE)?;
        let mut bytes = [0u8; SECRET_KEY_SIZE];
        bytes.copy_from_slice(&octets);
        Ok(Self { bytes })
    }

    /// Load from 32 big-endian bytes
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_SIZE]) -> CryptoResult<Self> {
        Self::from_biguint(&octets_to_integer(bytes))
    }

    /// The key as 32 big-endian bytes
    ///
    /// The returned reference should be used immediately and not stored.
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_SIZE] {
        &self.bytes
    }

    /// The key as an integer
    pub fn to_biguint(&self) -> BigUint {
        octets_to_integer(&self.bytes)
    }

    /// Get the corresponding compressed public key
    pub fn public_key(&self) -> CryptoResult<PublicKey> {
        pubkey_from_privkey(self)
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.bytes, &other.bytes)
    }
}

impl Eq for SecretKey {}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Withdrawal and signing keys of one validator slot
#[derive(Debug, PartialEq, Eq)]
pub struct ValidatorKeys {
    /// Key at `m/12381/3600/{index}/0`
    pub withdrawal: SecretKey,
    /// Key at `m/12381/3600/{index}/0/0`
    pub signing: SecretKey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn test_range_bounds() {
        let r = SCALAR_FIELD.modulus();

        assert_eq!(
            SecretKey::from_biguint(&BigUint::zero()),
            Err(CryptoError::InvalidSecretKey)
        );
        assert_eq!(
            SecretKey::from_biguint(r),
            Err(CryptoError::InvalidSecretKey)
        );
        assert!(SecretKey::from_biguint(&BigUint::one()).is_ok());
        assert!(SecretKey::from_biguint(&(r - BigUint::one())).is_ok());
    }

    #[test]
    fn test_bytes_and_integer_agree() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x2a;
        bytes[0] = 0x01;

        let sk = SecretKey::from_bytes(&bytes).unwrap();
        assert_eq!(sk.as_bytes(), &bytes);
        assert_eq!(sk.to_biguint(), BigUint::from_bytes_be(&bytes));
    }

    #[test]
    fn test_all_ones_bytes_rejected() {
        // 2^256 - 1 > r
        assert!(SecretKey::from_bytes(&[0xFF; 32]).is_err());
    }

    #[test]
    fn test_debug_output_redacted() {
        let sk = SecretKey::from_bytes(&[0x11; 32]).unwrap();
        let debug = format!("{:?}", sk);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("17")); // 0x11 = 17
    }
}
