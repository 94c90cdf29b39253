//! Secret wrapper utilities for consistent secret handling
//!
//! Type aliases and helpers around the `secrecy` crate for sensitive strings
//! and byte buffers.

use secrecy::{SecretBox, SecretString as SecrecySecretString};

/// A secret byte buffer that is zeroized on drop.
///
/// Use this for derived key material. The inner value can only be accessed
/// via `expose_secret()`.
///
/// # Example
///
/// ```rust
/// use vrun_crypto::secure::SecretBytes;
/// use secrecy::ExposeSecret;
///
/// let secret = SecretBytes::new(Box::new(vec![1, 2, 3, 4]));
/// assert_eq!(secret.expose_secret(), &vec![1, 2, 3, 4]);
/// ```
pub type SecretBytes = SecretBox<Vec<u8>>;

/// A secret string that is zeroized on drop, used for keystore passwords.
pub type SecretString = SecrecySecretString;

/// Extension trait for creating secret values.
pub trait IntoSecret {
    /// The secret type this converts into.
    type Secret;

    /// Convert into a secret value.
    fn into_secret(self) -> Self::Secret;
}

impl IntoSecret for String {
    type Secret = SecretString;

    fn into_secret(self) -> Self::Secret {
        self.into()
    }
}

impl IntoSecret for Vec<u8> {
    type Secret = SecretBytes;

    fn into_secret(self) -> Self::Secret {
        SecretBox::new(Box::new(self))
    }
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_into_secret_string() {
        let secret = "my-secret".to_string().into_secret();
        let exposed: &str = secret.expose_secret();
        assert_eq!(exposed, "my-secret");
    }

    #[test]
    fn test_into_secret_bytes() {
        let secret = vec![1, 2, 3].into_secret();
        assert_eq!(secret.expose_secret(), &vec![1, 2, 3]);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(&[1, 2, 3], &[1, 2, 3]));
        assert!(!constant_time_eq(&[1, 2, 3], &[1, 2, 4]));
        assert!(!constant_time_eq(&[1, 2, 3], &[1, 2]));
    }
}
