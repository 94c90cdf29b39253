//! Log-only commands: fee recipient, graffiti, enabled flag and exit

use alloy_primitives::Address;
use anyhow::{bail, Context, Result};
use tracing::info;
use vrun_crypto::PublicKey;
use vrun_storage::LogEntry;

use crate::config::Config;

/// Beacon block graffiti is a 32-byte field
pub const MAX_GRAFFITI_BYTES: usize = 32;

pub fn validate_graffiti(graffiti: &str) -> Result<()> {
    if graffiti.len() > MAX_GRAFFITI_BYTES {
        bail!(
            "Graffiti is {} bytes, at most {} allowed",
            graffiti.len(),
            MAX_GRAFFITI_BYTES
        );
    }
    Ok(())
}

/// Append `entry` to the log of an existing key
pub fn execute(
    config: &Config,
    address: &Address,
    pubkey: &PublicKey,
    entry: LogEntry,
) -> Result<()> {
    config
        .store()
        .append_log(address, pubkey, &entry)
        .with_context(|| format!("Failed to record {:?} for {}", entry.kind, pubkey))?;

    info!(%pubkey, kind = ?entry.kind, chain = %config.chain, "recorded action");
    Ok(())
}
