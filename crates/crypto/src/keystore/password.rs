//! Keystore password generation
//!
//! 32 random bytes are read as 16 little-endian UTF-16 code units. Units that
//! are control characters, a reserved ideographic block, or outside the Basic
//! Multilingual Plane below the surrogates are dropped, so a password holds
//! between 0 and 16 characters.

use rand::RngCore;
use zeroize::Zeroizing;

use crate::secure::{IntoSecret, SecretString};

/// Random bytes consumed per password
pub const PASSWORD_ENTROPY_BYTES: usize = 32;

/// Whether a UTF-16 code unit is dropped from generated passwords
pub fn is_excluded_code_unit(unit: u16) -> bool {
    matches!(unit, 0x0000..=0x001F | 0x007F | 0x0080..=0x009F | 0x2FE0..=0x2FEF)
        || unit > 0xD7FF
}

/// Build a password from 32 bytes, deterministically
pub fn password_from_bytes(bytes: &[u8; PASSWORD_ENTROPY_BYTES]) -> String {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .filter(|unit| !is_excluded_code_unit(*unit))
        // every unit kept is below the surrogate range
        .filter_map(|unit| char::from_u32(u32::from(unit)))
        .collect()
}

/// Generate a random keystore password
pub fn generate_password() -> SecretString {
    let mut bytes = Zeroizing::new([0u8; PASSWORD_ENTROPY_BYTES]);
    rand::thread_rng().fill_bytes(&mut bytes[..]);
    password_from_bytes(&bytes).into_secret()
}
