//! EIP-2333 hierarchical key tree
//!
//! Master keys come from HKDF over the seed with rejection of zero; children
//! are derived through a Lamport-style intermediate so that a child key does
//! not reveal its parent.

use hkdf::Hkdf;
use num_bigint::BigUint;
use num_traits::Zero;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};
use crate::field::SCALAR_FIELD;
use crate::keys::SecretKey;

/// Initial salt for `HKDF_mod_r`
const KEYGEN_SALT: &[u8] = b"BLS-SIG-KEYGEN-SALT-";

/// HKDF output length `L = ceil((3 * ceil(log2(r))) / 16)`
const OKM_LENGTH: usize = 48;

/// Minimum seed length accepted by `secret_key_from_seed`
pub const MIN_SEED_LENGTH: usize = 32;

/// Number of 32-byte chunks in each half of the Lamport key
const LAMPORT_CHUNKS: usize = 255;

const CHUNK_SIZE: usize = 32;

/// Big-endian octet string to integer (`OS2IP`)
pub fn octets_to_integer(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Integer to a big-endian octet string of exactly `length` bytes (`I2OSP`)
///
/// Fails with [`CryptoError::EncodingOverflow`] when `n >= 256^length`.
pub fn integer_to_octets(n: &BigUint, length: usize) -> CryptoResult<Vec<u8>> {
    let mut out = vec![0u8; length];
    if n.is_zero() {
        return Ok(out);
    }

    let raw = n.to_bytes_be();
    if raw.len() > length {
        return Err(CryptoError::EncodingOverflow { length });
    }
    out[length - raw.len()..].copy_from_slice(&raw);
    Ok(out)
}

/// Derive a master secret key from a seed (`HKDF_mod_r`)
///
/// The salt is re-hashed until the reduced output is nonzero. A zero result
/// has probability about `2^-255` per round, so the loop practically always
/// exits on the first pass.
pub fn secret_key_from_seed(seed: &[u8]) -> CryptoResult<SecretKey> {
    if seed.len() < MIN_SEED_LENGTH {
        return Err(CryptoError::InvalidSeedLength {
            expected: MIN_SEED_LENGTH,
            actual: seed.len(),
        });
    }

    // IKM = seed || I2OSP(0, 1)
    let mut ikm = Zeroizing::new(Vec::with_capacity(seed.len() + 1));
    ikm.extend_from_slice(seed);
    ikm.push(0);

    // info = key_info || I2OSP(L, 2) with empty key_info
    let info = (OKM_LENGTH as u16).to_be_bytes();

    let mut salt = KEYGEN_SALT.to_vec();
    loop {
        salt = Sha256::digest(&salt).to_vec();

        let mut okm = Zeroizing::new([0u8; OKM_LENGTH]);
        Hkdf::<Sha256>::new(Some(salt.as_slice()), ikm.as_slice())
            .expand(&info, &mut okm[..])
            .map_err(|e| CryptoError::Hkdf(e.to_string()))?;

        let sk = SCALAR_FIELD.reduce(&octets_to_integer(&okm[..]));
        if !sk.is_zero() {
            return SecretKey::from_biguint(&sk);
        }
        tracing::debug!("HKDF_mod_r produced zero, re-salting");
    }
}

/// Compress a parent key and index into a 32-byte Lamport public key hash
pub fn lamport_from_parent(sk: &SecretKey, index: u32) -> CryptoResult<[u8; 32]> {
    let salt = index.to_be_bytes();
    let ikm = Zeroizing::new(*sk.as_bytes());
    let not_ikm = Zeroizing::new((*ikm).map(|b| !b));

    // Feeding each chunk digest into one hasher equals hashing the
    // concatenated 2 * 255 * 32 byte lamport_PK.
    let mut compressed = Sha256::new();
    for key in [&*ikm, &*not_ikm] {
        let mut lamport = Zeroizing::new(vec![0u8; LAMPORT_CHUNKS * CHUNK_SIZE]);
        Hkdf::<Sha256>::new(Some(&salt[..]), &key[..])
            .expand(&[], &mut lamport[..])
            .map_err(|e| CryptoError::Hkdf(e.to_string()))?;

        for chunk in lamport.chunks_exact(CHUNK_SIZE) {
            compressed.update(Sha256::digest(chunk));
        }
    }

    Ok(compressed.finalize().into())
}

/// Derive the child secret key at `index`
pub fn derive_child(sk: &SecretKey, index: u32) -> CryptoResult<SecretKey> {
    let lamport_pk = Zeroizing::new(lamport_from_parent(sk, index)?);
    secret_key_from_seed(&lamport_pk[..])
}
