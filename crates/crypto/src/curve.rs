//! BLS12-381 G1 point arithmetic
//!
//! Points on `y^2 = x^3 + 4` over the base field. Addition and doubling use
//! the complete formulas of Renes, Costello and Batina (eprint 2015/1060),
//! Algorithms 8 (mixed addition) and 9 (doubling) for `a = 0` curves with
//! `b3 = 3 * b = 12`. The step order below follows the paper line by line.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::field::BASE_FIELD;

/// x coordinate of the standard G1 generator, big-endian
const G1_X: [u8; 48] = [
    0x17, 0xf1, 0xd3, 0xa7, 0x31, 0x97, 0xd7, 0x94, 0x26, 0x95, 0x63, 0x8c,
    0x4f, 0xa9, 0xac, 0x0f, 0xc3, 0x68, 0x8c, 0x4f, 0x97, 0x74, 0xb9, 0x05,
    0xa1, 0x4e, 0x3a, 0x3f, 0x17, 0x1b, 0xac, 0x58, 0x6c, 0x55, 0xe8, 0x3f,
    0xf9, 0x7a, 0x1a, 0xef, 0xfb, 0x3a, 0xf0, 0x0a, 0xdb, 0x22, 0xc6, 0xbb,
];

/// y coordinate of the standard G1 generator, big-endian
const G1_Y: [u8; 48] = [
    0x08, 0xb3, 0xf4, 0x81, 0xe3, 0xaa, 0xa0, 0xf1, 0xa0, 0x9e, 0x30, 0xed,
    0x74, 0x1d, 0x8a, 0xe4, 0xfc, 0xf5, 0xe0, 0x95, 0xd5, 0xd0, 0x0a, 0xf6,
    0x00, 0xdb, 0x18, 0xcb, 0x2c, 0x04, 0xb3, 0xed, 0xd0, 0x3c, 0xc7, 0x44,
    0xa2, 0x88, 0x8a, 0xe4, 0x0c, 0xaa, 0x23, 0x29, 0x46, 0xc5, 0xe7, 0xe1,
];

/// Curve coefficient `b`
const CURVE_B: u32 = 4;

/// `3 * b`
const B3: u32 = 3 * CURVE_B;

/// G1 point in affine coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct G1Affine {
    pub x: BigUint,
    pub y: BigUint,
}

/// G1 point in homogeneous projective coordinates `(X : Y : Z)`
#[derive(Debug, Clone)]
pub struct G1Projective {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
}

impl G1Affine {
    /// The standard BLS12-381 G1 generator
    pub fn generator() -> Self {
        Self {
            x: BigUint::from_bytes_be(&G1_X),
            y: BigUint::from_bytes_be(&G1_Y),
        }
    }

    /// Check `y^2 == x^3 + 4 (mod p)`
    pub fn is_on_curve(&self) -> bool {
        let f = &*BASE_FIELD;
        let lhs = f.mul(&self.y, &self.y);
        let x3 = f.mul(&f.mul(&self.x, &self.x), &self.x);
        let rhs = f.add(&x3, &BigUint::from(CURVE_B));
        lhs == rhs
    }

    /// Scalar multiplication `n * self`
    ///
    /// Left-to-right double-and-add. The accumulator starts at `self`, which
    /// consumes the top bit of `n` without a doubling. There is no identity in
    /// affine form, so `n == 0` yields `None`.
    ///
    /// Runs in time dependent on the bits of `n`.
    pub fn mul(&self, n: &BigUint) -> Option<G1Projective> {
        let bits = n.bits();
        if bits == 0 {
            return None;
        }

        let mut acc = G1Projective::from(self);
        for i in (0..bits - 1).rev() {
            acc = acc.double();
            if n.bit(i) {
                acc = acc.add_affine(self);
            }
        }
        Some(acc)
    }
}

impl From<&G1Affine> for G1Projective {
    fn from(p: &G1Affine) -> Self {
        Self {
            x: p.x.clone(),
            y: p.y.clone(),
            z: BigUint::one(),
        }
    }
}

impl G1Projective {
    /// Whether this is the point at infinity (`Z == 0`)
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Mixed addition `self + q` (Algorithm 8)
    ///
    /// Complete for every projective `self`, including `self == q`.
    pub fn add_affine(&self, q: &G1Affine) -> G1Projective {
        let f = &*BASE_FIELD;
        let b3 = BigUint::from(B3);
        let (x1, y1, z1) = (&self.x, &self.y, &self.z);
        let (x2, y2) = (&q.x, &q.y);

        let mut t0 = f.mul(x1, x2); //  1
        let mut t1 = f.mul(y1, y2); //  2
        let mut t3 = f.add(x2, y2); //  3
        let mut t4 = f.add(x1, y1); //  4
        t3 = f.mul(&t3, &t4); //  5
        t4 = f.add(&t0, &t1); //  6
        t3 = f.sub(&t3, &t4); //  7
        t4 = f.mul(y2, z1); //  8
        t4 = f.add(&t4, y1); //  9
        let mut y3 = f.mul(x2, z1); // 10
        y3 = f.add(&y3, x1); // 11
        let mut x3 = f.add(&t0, &t0); // 12
        t0 = f.add(&x3, &t0); // 13
        let mut t2 = f.mul(&b3, z1); // 14
        let mut z3 = f.add(&t1, &t2); // 15
        t1 = f.sub(&t1, &t2); // 16
        y3 = f.mul(&b3, &y3); // 17
        x3 = f.mul(&t4, &y3); // 18
        t2 = f.mul(&t3, &t1); // 19
        x3 = f.sub(&t2, &x3); // 20
        y3 = f.mul(&y3, &t0); // 21
        t1 = f.mul(&t1, &z3); // 22
        y3 = f.add(&t1, &y3); // 23
        t0 = f.mul(&t0, &t3); // 24
        z3 = f.mul(&z3, &t4); // 25
        z3 = f.add(&z3, &t0); // 26

        G1Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Point doubling `2 * self` (Algorithm 9)
    pub fn double(&self) -> G1Projective {
        let f = &*BASE_FIELD;
        let b3 = BigUint::from(B3);
        let (x, y, z) = (&self.x, &self.y, &self.z);

        let mut t0 = f.mul(y, y); //  1
        let mut z3 = f.add(&t0, &t0); //  2
        z3 = f.add(&z3, &z3); //  3
        z3 = f.add(&z3, &z3); //  4
        let mut t1 = f.mul(y, z); //  5
        let mut t2 = f.mul(z, z); //  6
        t2 = f.mul(&b3, &t2); //  7
        let mut x3 = f.mul(&t2, &z3); //  8
        let mut y3 = f.add(&t0, &t2); //  9
        z3 = f.mul(&t1, &z3); // 10
        t1 = f.add(&t2, &t2); // 11
        t2 = f.add(&t1, &t2); // 12
        t0 = f.sub(&t0, &t2); // 13
        y3 = f.mul(&t0, &y3); // 14
        y3 = f.add(&x3, &y3); // 15
        t1 = f.mul(x, y); // 16
        x3 = f.mul(&t0, &t1); // 17
        x3 = f.add(&x3, &x3); // 18

        G1Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Normalize to affine coordinates, `None` at infinity
    pub fn to_affine(&self) -> Option<G1Affine> {
        let f = &*BASE_FIELD;
        let z_inv = f.inv(&self.z)?;
        Some(G1Affine {
            x: f.mul(&self.x, &z_inv),
            y: f.mul(&self.y, &z_inv),
        })
    }
}

/// Projective equality: `X1*Z2 == X2*Z1` and `Y1*Z2 == Y2*Z1`
impl PartialEq for G1Projective {
    fn eq(&self, other: &Self) -> bool {
        let f = &*BASE_FIELD;
        f.mul(&self.x, &other.z) == f.mul(&other.x, &self.z)
            && f.mul(&self.y, &other.z) == f.mul(&other.y, &self.z)
    }
}

impl Eq for G1Projective {}
