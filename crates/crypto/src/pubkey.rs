//! Compressed BLS12-381 public keys
//!
//! A public key is `sk * G1`, serialized as the 48-byte big-endian affine x
//! coordinate with three flag bits on the first byte (ZCash serialization
//! format):
//! - bit 7: compressed encoding, always set
//! - bit 6: point at infinity, never set for a valid secret key
//! - bit 5: y is the larger of its two square roots (`2y >= p`)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::curve::G1Affine;
use crate::error::{CryptoError, CryptoResult};
use crate::field::BASE_FIELD;
use crate::keys::SecretKey;
use crate::tree::integer_to_octets;

/// Compressed public key length in bytes
pub const PUBLIC_KEY_SIZE: usize = 48;

const COMPRESSION_FLAG: u8 = 0b1000_0000;
const INFINITY_FLAG: u8 = 0b0100_0000;
const SIGN_FLAG: u8 = 0b0010_0000;

/// BLS12-381 public key (48 bytes compressed)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// Load from 48 compressed bytes
    ///
    /// Only the flag bits are checked; the point is not decompressed.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> CryptoResult<Self> {
        if bytes[0] & COMPRESSION_FLAG == 0 {
            return Err(CryptoError::InvalidPublicKey(
                "compression flag not set".to_string(),
            ));
        }
        if bytes[0] & INFINITY_FLAG != 0 {
            return Err(CryptoError::InvalidPublicKey(
                "point at infinity".to_string(),
            ));
        }
        Ok(Self(bytes))
    }

    /// Serialize to bytes (48 bytes compressed)
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0
    }

    /// Lowercase hex with `0x` prefix, the form used in paths and logs
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Lowercase hex without prefix, the form used inside keystores
    pub fn to_hex_unprefixed(&self) -> String {
        hex::encode(self.0)
    }
}

/// Compute the compressed public key of `sk`
pub fn pubkey_from_privkey(sk: &SecretKey) -> CryptoResult<PublicKey> {
    let point = G1Affine::generator()
        .mul(&sk.to_biguint())
        .and_then(|p| p.to_affine())
        .ok_or(CryptoError::PointAtInfinity)?;

    let x = integer_to_octets(&point.x, PUBLIC_KEY_SIZE)?;
    let mut bytes = [0u8; PUBLIC_KEY_SIZE];
    bytes.copy_from_slice(&x);

    bytes[0] |= COMPRESSION_FLAG;
    if &point.y * 2u32 >= *BASE_FIELD.modulus() {
        bytes[0] |= SIGN_FLAG;
    }

    Ok(PublicKey(bytes))
}

impl FromStr for PublicKey {
    type Err = CryptoError;

    /// Parse hex, with or without `0x`, in either case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(digits).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        let bytes: [u8; PUBLIC_KEY_SIZE] = raw.try_into().map_err(|raw: Vec<u8>| {
            CryptoError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                PUBLIC_KEY_SIZE,
                raw.len()
            ))
        })?;
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(0x{}..)", hex::encode(&self.0[..8]))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
