//! Secure memory handling for seeds and derived secrets
//!
//! - Automatic zeroing on drop via `zeroize`
//! - Debug output masking to prevent log exposure
//! - No `Clone` on raw seed material
//!
//! # Example
//!
//! ```rust
//! use vrun_crypto::secure::Seed;
//!
//! let seed = Seed::generate();
//! assert_eq!(seed.expose_secret().len(), 32);
//! drop(seed); // memory is zeroed here
//! ```

mod secret;
mod seed;

pub use secrecy::ExposeSecret;
pub use secret::{constant_time_eq, IntoSecret, SecretBytes, SecretString};
pub use seed::{Seed, SEED_SIZE};
