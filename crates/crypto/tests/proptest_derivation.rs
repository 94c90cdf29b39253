//! Property-based tests for the key tree
//!
//! HKDF and the Lamport step are slow relative to proptest's defaults, so
//! case counts are reduced.

use num_bigint::BigUint;
use num_traits::One;
use proptest::prelude::*;
use vrun_crypto::field::SCALAR_FIELD;
use vrun_crypto::{derive_child, integer_to_octets, octets_to_integer, secret_key_from_seed};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every 32-byte seed maps into [1, r-1]
    #[test]
    fn prop_master_key_in_range(seed in any::<[u8; 32]>()) {
        let sk = secret_key_from_seed(&seed).unwrap().to_biguint();
        prop_assert!(sk >= BigUint::one());
        prop_assert!(&sk < SCALAR_FIELD.modulus());
    }

    /// Encoding within range is invertible and keeps the requested width
    #[test]
    fn prop_octets_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let n = octets_to_integer(&bytes);
        let encoded = integer_to_octets(&n, bytes.len()).unwrap();
        prop_assert_eq!(encoded.len(), bytes.len());
        prop_assert_eq!(octets_to_integer(&encoded), n);
        prop_assert_eq!(encoded, bytes);
    }

    /// Anything at or above 256^l does not fit in l bytes
    #[test]
    fn prop_octets_overflow(len in 1usize..48, extra in any::<u32>()) {
        let limit = BigUint::one() << (8 * len);
        prop_assert!(integer_to_octets(&(limit + extra), len).is_err());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Child derivation is a pure function of parent and index
    #[test]
    fn prop_derive_child_deterministic(seed in any::<[u8; 32]>(), index in any::<u32>()) {
        let parent = secret_key_from_seed(&seed).unwrap();
        let a = derive_child(&parent, index).unwrap();
        let b = derive_child(&parent, index).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Neighbouring indices give different children
    #[test]
    fn prop_sibling_children_differ(seed in any::<[u8; 32]>(), index in 0u32..u32::MAX) {
        let parent = secret_key_from_seed(&seed).unwrap();
        let a = derive_child(&parent, index).unwrap();
        let b = derive_child(&parent, index + 1).unwrap();
        prop_assert_ne!(a, b);
    }
}
