//! Account root seed with automatic memory zeroing
//!
//! The seed is the only persisted secret of an account. Every validator key
//! is re-derived from it on demand.

use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, CryptoResult};

/// Size of an account seed in bytes
pub const SEED_SIZE: usize = 32;

/// Memory-safe container for an account seed.
///
/// Does not implement `Clone`; `Debug` prints `[REDACTED]`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: [u8; SEED_SIZE],
}

impl Seed {
    /// Wrap 32 raw seed bytes
    pub fn new(bytes: [u8; SEED_SIZE]) -> Self {
        Self { bytes }
    }

    /// Draw a fresh seed from the thread-local CSPRNG
    pub fn generate() -> Self {
        let mut bytes = [0u8; SEED_SIZE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Parse a seed from a slice that must be exactly 32 bytes long
    pub fn from_slice(bytes: &[u8]) -> CryptoResult<Self> {
        let bytes: [u8; SEED_SIZE] =
            bytes.try_into().map_err(|_| CryptoError::InvalidSeedLength {
                expected: SEED_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self { bytes })
    }

    /// Get a reference to the seed bytes.
    ///
    /// The returned reference should be used immediately and not stored.
    #[inline]
    pub fn expose_secret(&self) -> &[u8; SEED_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seed").field("bytes", &"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_from_slice() {
        let seed = Seed::from_slice(&[7u8; 32]).unwrap();
        assert_eq!(seed.expose_secret(), &[7u8; 32]);
    }

    #[test]
    fn test_seed_wrong_length_rejected() {
        let err = Seed::from_slice(&[7u8; 31]).unwrap_err();
        assert_eq!(
            err,
            CryptoError::InvalidSeedLength {
                expected: 32,
                actual: 31
            }
        );
        assert!(Seed::from_slice(&[7u8; 64]).is_err());
    }

    #[test]
    fn test_generated_seeds_differ() {
        let a = Seed::generate();
        let b = Seed::generate();
        assert_ne!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn test_debug_output_redacted() {
        let seed = Seed::new([0xAB; SEED_SIZE]);
        let debug_str = format!("{:?}", seed);

        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("171")); // 0xAB = 171
    }

    #[test]
    fn test_zeroize_clears_bytes() {
        let mut seed = Seed::new([0xAA; SEED_SIZE]);
        seed.zeroize();
        assert_eq!(seed.expose_secret(), &[0u8; SEED_SIZE]);
    }
}
