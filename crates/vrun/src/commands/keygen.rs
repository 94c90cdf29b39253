//! `keygen` command

use alloy_primitives::Address;
use anyhow::{anyhow, Context, Result};
use tracing::{debug, info, warn};
use vrun_crypto::path::{prefix_key, validator_keys, KeySource};
use vrun_crypto::PublicKey;
use vrun_storage::StorageError;

use crate::config::Config;

/// Claim the first free index at or above `start`
///
/// An index is free when its signing pubkey has no log. Claiming creates the
/// log exclusively, so a concurrent run that wins the race pushes this one on
/// to the next index.
pub fn execute(config: &Config, address: &Address, start: u32) -> Result<(PublicKey, u32)> {
    let store = config.store();
    let seed = store
        .read_seed(address)
        .with_context(|| format!("Failed to load seed for {}", address))?;
    let prefix = prefix_key(&seed).context("Failed to derive prefix key")?;

    let mut index = start;
    loop {
        let keys = validator_keys(KeySource::PrefixKey(&prefix), index)?;
        let pubkey = keys.signing.public_key()?;

        if store.has_key(address, &pubkey) {
            debug!(index, %pubkey, "index already generated");
        } else {
            match store.create_key(address, &pubkey, index) {
                Ok(()) => {
                    info!(index, %pubkey, chain = %config.chain, "generated validator key");
                    return Ok((pubkey, index));
                }
                Err(StorageError::AlreadyExists(_)) => {
                    warn!(index, %pubkey, "index claimed concurrently, moving on");
                }
                Err(e) => {
                    return Err(e).context(format!("Failed to create log for {}", pubkey));
                }
            }
        }

        index = index
            .checked_add(1)
            .ok_or_else(|| anyhow!("No free validator index at or above {}", start))?;
    }
}
