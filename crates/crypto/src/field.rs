//! Modular arithmetic over the two BLS12-381 prime fields
//!
//! Curve coordinates live in the base field (modulus `p`), secret keys in the
//! scalar field (modulus `r`, the order of G1). Each field is a separate
//! [`PrimeField`] value so the two moduli cannot be mixed up at a call site:
//! curve code only ever touches [`BASE_FIELD`], key derivation only
//! [`SCALAR_FIELD`].

use std::sync::LazyLock;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// BLS12-381 base field modulus `p`, big-endian
pub const BASE_MODULUS: [u8; 48] = [
    0x1a, 0x01, 0x11, 0xea, 0x39, 0x7f, 0xe6, 0x9a, 0x4b, 0x1b, 0xa7, 0xb6,
    0x43, 0x4b, 0xac, 0xd7, 0x64, 0x77, 0x4b, 0x84, 0xf3, 0x85, 0x12, 0xbf,
    0x67, 0x30, 0xd2, 0xa0, 0xf6, 0xb0, 0xf6, 0x24, 0x1e, 0xab, 0xff, 0xfe,
    0xb1, 0x53, 0xff, 0xff, 0xb9, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xaa, 0xab,
];

/// BLS12-381 scalar field modulus `r`, big-endian, the order of G1
pub const SCALAR_MODULUS: [u8; 32] = [
    0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08,
    0x09, 0xa1, 0xd8, 0x05, 0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe,
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
];

/// Base field `F_p`, used for curve point coordinates
pub static BASE_FIELD: LazyLock<PrimeField> =
    LazyLock::new(|| PrimeField::from_be_bytes(&BASE_MODULUS));

/// Scalar field `F_r`, used for secret keys
pub static SCALAR_FIELD: LazyLock<PrimeField> =
    LazyLock::new(|| PrimeField::from_be_bytes(&SCALAR_MODULUS));

/// A prime field given by its modulus
///
/// All results are reduced into `[0, modulus)`. Inputs may be unreduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    /// Create a field from its modulus
    pub fn new(modulus: BigUint) -> Self {
        Self { modulus }
    }

    fn from_be_bytes(bytes: &[u8]) -> Self {
        Self::new(BigUint::from_bytes_be(bytes))
    }

    /// The field modulus
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Reduce `a` into `[0, modulus)`
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.modulus
    }

    /// `a + b mod m`
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    /// `a - b mod m`
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = self.reduce(a);
        let b = self.reduce(b);
        if a >= b {
            a - b
        } else {
            &self.modulus - b + a
        }
    }

    /// `a * b mod m`
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Multiplicative inverse via the extended Euclidean algorithm
    ///
    /// Returns `None` when `a` shares a factor with the modulus, which for a
    /// prime field means `a == 0 mod m`.
    pub fn inv(&self, a: &BigUint) -> Option<BigUint> {
        let m = BigInt::from(self.modulus.clone());
        let (mut t, mut new_t) = (BigInt::zero(), BigInt::one());
        let (mut r, mut new_r) = (m.clone(), BigInt::from(self.reduce(a)));

        while !new_r.is_zero() {
            let q = &r / &new_r;
            let next_t = &t - &q * &new_t;
            let next_r = &r - &q * &new_r;
            t = std::mem::replace(&mut new_t, next_t);
            r = std::mem::replace(&mut new_r, next_r);
        }

        if !r.is_one() {
            return None;
        }

        t.mod_floor(&m).to_biguint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_small_field_ops() {
        let f = PrimeField::new(big(13));

        assert_eq!(f.add(&big(9), &big(7)), big(3));
        assert_eq!(f.sub(&big(3), &big(7)), big(9));
        assert_eq!(f.sub(&big(7), &big(3)), big(4));
        assert_eq!(f.mul(&big(5), &big(8)), big(1));
        assert_eq!(f.inv(&big(5)), Some(big(8)));
    }

    #[test]
    fn test_sub_accepts_unreduced_inputs() {
        let f = PrimeField::new(big(13));
        assert_eq!(f.sub(&big(1), &big(40)), big(0));
        assert_eq!(f.sub(&big(30), &big(2)), big(2));
    }

    #[test]
    fn test_inverse_of_zero_is_none() {
        assert_eq!(BASE_FIELD.inv(&BigUint::zero()), None);
        assert_eq!(SCALAR_FIELD.inv(SCALAR_FIELD.modulus()), None);
    }

    #[test]
    fn test_inverse_matches_fermat() {
        for field in [&*BASE_FIELD, &*SCALAR_FIELD] {
            let exp = field.modulus() - big(2);
            for a in [big(1), big(2), big(0xdead_beef), field.modulus() - big(1)] {
                let inv = field.inv(&a).unwrap();
                assert_eq!(inv, a.modpow(&exp, field.modulus()));
                assert!(field.mul(&a, &inv).is_one());
            }
        }
    }

    #[test]
    fn test_moduli_match_published_values() {
        let p = "4002409555221667393417789825735904156556882819939007885332058136124031650490837864442687629129015664037894272559787";
        let r = "52435875175126190479447740508185965837690552500527637822603658699938581184513";
        let p = BigUint::parse_bytes(p.as_bytes(), 10).unwrap();
        let r = BigUint::parse_bytes(r.as_bytes(), 10).unwrap();
        assert_eq!(BASE_FIELD.modulus(), &p);
        assert_eq!(SCALAR_FIELD.modulus(), &r);
    }

    #[test]
    fn test_fields_are_distinct() {
        assert_ne!(BASE_FIELD.modulus(), SCALAR_FIELD.modulus());
        assert_eq!(BASE_FIELD.modulus().bits(), 381);
        assert_eq!(SCALAR_FIELD.modulus().bits(), 255);
    }

    #[test]
    fn test_no_truncation_above_256_bits() {
        let a = BASE_FIELD.modulus() - big(1);
        // (p-1)^2 = 1 mod p
        assert!(BASE_FIELD.mul(&a, &a).is_one());
        assert_eq!(BASE_FIELD.add(&a, &big(1)), BigUint::zero());
    }
}
