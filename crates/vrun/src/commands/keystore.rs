//! `keystore` command

use alloy_primitives::Address;
use anyhow::{anyhow, bail, Context, Result};
use tracing::info;
use vrun_crypto::path::{validator_keys, KeySource, ValidatorPaths};
use vrun_crypto::{GeneratedKeystore, KeystoreBuilder, PublicKey};

use crate::config::Config;

/// Export the signing key of a generated validator
///
/// The index is `index` when given, otherwise the one recorded in the log of
/// `pubkey`. When both are given they must agree.
pub fn execute(
    config: &Config,
    address: &Address,
    pubkey: Option<&PublicKey>,
    index: Option<u32>,
) -> Result<GeneratedKeystore> {
    let store = config.store();

    let index = match (index, pubkey) {
        (Some(index), _) => index,
        (None, Some(pubkey)) => store
            .keygen_index(address, pubkey)
            .with_context(|| format!("Failed to read index of {}", pubkey))?,
        (None, None) => return Err(anyhow!("Either a pubkey or an index is required")),
    };

    let seed = store
        .read_seed(address)
        .with_context(|| format!("Failed to load seed for {}", address))?;
    let keys = validator_keys(KeySource::Seed(&seed), index)?;
    let derived = keys.signing.public_key()?;

    if let Some(pubkey) = pubkey {
        if *pubkey != derived {
            bail!("Pubkey {} is not the signing key at index {}", pubkey, index);
        }
    }
    if !store.has_key(address, &derived) {
        bail!("Key at index {} not generated", index);
    }

    let paths = ValidatorPaths::new(index);
    let generated = KeystoreBuilder::new(&keys.signing)
        .path(&paths.signing)
        .pubkey(derived)
        .build()
        .context("Failed to build keystore")?;

    info!(index, pubkey = %derived, uuid = %generated.keystore.uuid, "exported keystore");
    Ok(generated)
}
