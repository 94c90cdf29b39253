//! EIP-2335 keystore assembly
//!
//! Combines the KDF, cipher and checksum modules around one secret key and
//! returns the keystore together with the password it was sealed with.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::checksum::{compute_checksum, ChecksumModule};
use super::cipher::{encrypt_secret, generate_iv, CipherModule};
use super::error::KeystoreResult;
use super::kdf::{generate_salt, KdfModule};
use super::password::generate_password;
use crate::keys::SecretKey;
use crate::pubkey::{pubkey_from_privkey, PublicKey};
use crate::secure::{IntoSecret, SecretString};

/// Version number for EIP-2335 keystores
pub const KEYSTORE_VERSION: u32 = 4;

/// EIP-2335 keystore
///
/// Field order follows the EIP-2335 examples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Keystore {
    /// KDF, checksum and cipher parameters
    pub crypto: CryptoModule,
    /// Derivation path of the sealed key, empty when unknown
    pub path: String,
    /// Public key as lowercase hex without `0x`
    pub pubkey: String,
    /// Random v4 UUID
    pub uuid: String,
    /// Always 4
    pub version: u32,
}

/// Combined crypto parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CryptoModule {
    pub kdf: KdfModule,
    pub checksum: ChecksumModule,
    pub cipher: CipherModule,
}

/// A keystore and the password that opens it
#[derive(Debug)]
pub struct GeneratedKeystore {
    pub keystore: Keystore,
    pub password: SecretString,
}

/// `{"keystore", "password"}` output document
#[derive(Serialize)]
struct KeystoreOutput<'a> {
    keystore: &'a Keystore,
    password: &'a str,
}

impl GeneratedKeystore {
    /// Render `{"keystore": ..., "password": ...}` as a JSON string
    ///
    /// The result holds the password in clear text.
    pub fn to_json(&self) -> KeystoreResult<String> {
        let output = KeystoreOutput {
            keystore: &self.keystore,
            password: self.password.expose_secret(),
        };
        Ok(serde_json::to_string(&output)?)
    }
}

/// Builder sealing one secret key into a [`Keystore`]
pub struct KeystoreBuilder<'a> {
    secret_key: &'a SecretKey,
    path: String,
    pubkey: Option<PublicKey>,
    password: Option<SecretString>,
    uuid: Option<String>,
}

impl<'a> KeystoreBuilder<'a> {
    /// Start a keystore for `secret_key`
    pub fn new(secret_key: &'a SecretKey) -> Self {
        Self {
            secret_key,
            path: String::new(),
            pubkey: None,
            password: None,
            uuid: None,
        }
    }

    /// Set the derivation path recorded in the keystore
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Use a known public key instead of computing it
    pub fn pubkey(mut self, pubkey: PublicKey) -> Self {
        self.pubkey = Some(pubkey);
        self
    }

    /// Use a caller-chosen password instead of generating one
    pub fn password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string().into_secret());
        self
    }

    /// Set a custom UUID (normally generated)
    pub fn uuid(mut self, uuid: &str) -> Self {
        self.uuid = Some(uuid.to_string());
        self
    }

    /// Seal the key
    pub fn build(self) -> KeystoreResult<GeneratedKeystore> {
        let pubkey = match self.pubkey {
            Some(pubkey) => pubkey,
            None => pubkey_from_privkey(self.secret_key)?,
        };
        let password = self.password.unwrap_or_else(generate_password);

        let salt = generate_salt();
        let iv = generate_iv();

        let kdf = KdfModule::new_scrypt(salt);
        let derived_key = kdf.derive_key(password.expose_secret())?;
        let dk_bytes = derived_key.expose_secret();

        let plaintext = Zeroizing::new(*self.secret_key.as_bytes());
        let ciphertext = encrypt_secret(&plaintext[..], dk_bytes, &iv)?;
        let checksum = compute_checksum(dk_bytes, &ciphertext)?;

        let keystore = Keystore {
            crypto: CryptoModule {
                kdf,
                checksum: ChecksumModule::new(&checksum),
                cipher: CipherModule::new(&iv, &ciphertext),
            },
            path: self.path,
            pubkey: pubkey.to_hex_unprefixed(),
            uuid: self.uuid.unwrap_or_else(|| Uuid::new_v4().to_string()),
            version: KEYSTORE_VERSION,
        };

        tracing::debug!(
            uuid = %keystore.uuid,
            path = %keystore.path,
            pubkey = %pubkey,
            "built keystore"
        );

        Ok(GeneratedKeystore { keystore, password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keystore::error::KeystoreError;

    fn test_key() -> SecretKey {
        SecretKey::from_bytes(&[0x2Au8; 32]).unwrap()
    }

    /// Open a keystore the way a validator client does
    fn open(keystore: &Keystore, password: &str) -> KeystoreResult<Vec<u8>> {
        let derived_key = keystore.crypto.kdf.derive_key(password)?;
        let dk = derived_key.expose_secret();
        let ciphertext = keystore.crypto.cipher.ciphertext()?;
        keystore.crypto.checksum.verify(dk, &ciphertext)?;
        encrypt_secret(&ciphertext, dk, &keystore.crypto.cipher.iv()?)
    }

    #[test]
    fn test_build_and_open() {
        let sk = test_key();
        let generated = KeystoreBuilder::new(&sk)
            .path("m/12381/3600/0/0/0")
            .password("hunter2")
            .build()
            .unwrap();

        assert_eq!(generated.password.expose_secret(), "hunter2");
        assert_eq!(generated.keystore.version, KEYSTORE_VERSION);
        assert_eq!(generated.keystore.path, "m/12381/3600/0/0/0");

        let opened = open(&generated.keystore, "hunter2").unwrap();
        assert_eq!(opened, sk.as_bytes().to_vec());
    }

    #[test]
    fn test_wrong_password_fails_checksum() {
        let sk = test_key();
        let generated = KeystoreBuilder::new(&sk).password("right").build().unwrap();

        assert!(matches!(
            open(&generated.keystore, "wrong"),
            Err(KeystoreError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_generated_password_opens_keystore() {
        let sk = test_key();
        let generated = KeystoreBuilder::new(&sk).build().unwrap();

        let opened = open(&generated.keystore, generated.password.expose_secret()).unwrap();
        assert_eq!(opened, sk.as_bytes().to_vec());
    }

    #[test]
    fn test_pubkey_computed_or_taken() {
        let sk = test_key();
        let expected = sk.public_key().unwrap();

        let computed = KeystoreBuilder::new(&sk).password("").build().unwrap();
        assert_eq!(computed.keystore.pubkey, expected.to_hex_unprefixed());
        assert!(!computed.keystore.pubkey.starts_with("0x"));

        let other = SecretKey::from_bytes(&[0x07u8; 32]).unwrap().public_key().unwrap();
        let given = KeystoreBuilder::new(&sk)
            .pubkey(other)
            .password("")
            .build()
            .unwrap();
        assert_eq!(given.keystore.pubkey, other.to_hex_unprefixed());
    }

    #[test]
    fn test_json_layout() {
        let sk = test_key();
        let generated = KeystoreBuilder::new(&sk)
            .path("m/12381/3600/1/0/0")
            .password("pw")
            .uuid("12345678-1234-5678-1234-567812345678")
            .build()
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&generated.to_json().unwrap()).unwrap();
        assert_eq!(json["password"], "pw");

        let ks = &json["keystore"];
        assert_eq!(ks["version"], 4);
        assert_eq!(ks["uuid"], "12345678-1234-5678-1234-567812345678");
        assert_eq!(ks["crypto"]["kdf"]["function"], "scrypt");
        assert_eq!(ks["crypto"]["kdf"]["params"]["n"], 16384);
        assert_eq!(ks["crypto"]["kdf"]["params"]["r"], 8);
        assert_eq!(ks["crypto"]["kdf"]["params"]["p"], 1);
        assert_eq!(ks["crypto"]["kdf"]["params"]["dklen"], 32);
        assert_eq!(ks["crypto"]["kdf"]["message"], "");
        assert_eq!(ks["crypto"]["checksum"]["function"], "sha256");
        assert_eq!(ks["crypto"]["cipher"]["function"], "aes-128-ctr");
        assert_eq!(ks["crypto"]["cipher"]["message"].as_str().unwrap().len(), 64);

        let text = serde_json::to_string(&generated.keystore).unwrap();
        let crypto = text.find("\"crypto\"").unwrap();
        let path = text.find("\"path\"").unwrap();
        let pubkey = text.find("\"pubkey\"").unwrap();
        let uuid = text.find("\"uuid\"").unwrap();
        let version = text.find("\"version\"").unwrap();
        assert!(crypto < path && path < pubkey && pubkey < uuid && uuid < version);
    }

    #[test]
    fn test_output_keeps_field_order() {
        let sk = test_key();
        let generated = KeystoreBuilder::new(&sk)
            .path("m/12381/3600/0/0")
            .password("pw")
            .build()
            .unwrap();
        let text = generated.to_json().unwrap();

        assert!(text.starts_with(r#"{"keystore":{"crypto":{"kdf":{"function":"scrypt","params":{"#));
        assert!(text.ends_with(r#""version":4},"password":"pw"}"#));

        let order = |keys: &[&str]| {
            let positions: Vec<usize> = keys
                .iter()
                .map(|k| text.find(&format!("\"{}\"", k)).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?} out of order", keys);
        };
        order(&["kdf", "checksum", "cipher", "path", "pubkey", "uuid", "version", "password"]);
        order(&["dklen", "n", "p", "r", "salt"]);
        order(&["aes-128-ctr", "iv"]);
    }

    #[test]
    fn test_fresh_randomness_per_build() {
        let sk = test_key();
        let a = KeystoreBuilder::new(&sk).password("x").build().unwrap();
        let b = KeystoreBuilder::new(&sk).password("x").build().unwrap();

        assert_ne!(a.keystore.uuid, b.keystore.uuid);
        assert_ne!(a.keystore.crypto.cipher.params.iv, b.keystore.crypto.cipher.params.iv);
        assert_ne!(a.keystore.crypto.cipher.message, b.keystore.crypto.cipher.message);
        assert!(Uuid::parse_str(&a.keystore.uuid).is_ok());
    }
}
