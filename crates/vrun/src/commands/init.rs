//! `init` command

use alloy_primitives::Address;
use anyhow::{Context, Result};

use crate::config::Config;

/// Create the account directory, init timestamp and seed
pub fn execute(config: &Config, address: &Address) -> Result<()> {
    config
        .store()
        .init_account(address)
        .with_context(|| format!("Failed to initialize account {}", address))
}
