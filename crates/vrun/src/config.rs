//! Runtime configuration: chain selection and database location

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use alloy_primitives::Address;
use vrun_storage::AccountStore;

/// Environment variable selecting the chain
pub const CHAIN_ENV: &str = "CHAIN";

/// Environment variable overriding the database root
pub const VRUN_DB_ENV: &str = "VRUN_DB";

/// Default database root, relative to the working directory
pub const DEFAULT_DB_DIR: &str = "db";

/// Supported networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Chain {
    #[default]
    Mainnet,
    Holesky,
}

impl Chain {
    pub fn id(&self) -> u64 {
        match self {
            Chain::Mainnet => 1,
            Chain::Holesky => 17000,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Chain::Mainnet => "mainnet",
            Chain::Holesky => "holesky",
        }
    }
}

impl FromStr for Chain {
    type Err = String;

    /// Accepts a chain id or a name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "mainnet" => Ok(Chain::Mainnet),
            "17000" | "holesky" => Ok(Chain::Holesky),
            other => Err(format!(
                "unknown chain '{}', expected 1, mainnet, 17000 or holesky",
                other
            )),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Config {
    pub chain: Chain,
    pub db_root: PathBuf,
}

impl Config {
    pub fn new(chain: Chain, db_root: impl Into<PathBuf>) -> Self {
        Self {
            chain,
            db_root: db_root.into(),
        }
    }

    /// Account store for the configured chain
    pub fn store(&self) -> AccountStore {
        AccountStore::new(&self.db_root, self.chain.id())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Chain::default(), DEFAULT_DB_DIR)
    }
}

/// Parse an address, enforcing the EIP-55 checksum when the input is mixed case
pub fn parse_address(s: &str) -> Result<Address, String> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let mixed_case = digits.chars().any(|c| c.is_ascii_lowercase())
        && digits.chars().any(|c| c.is_ascii_uppercase());

    let parsed = if mixed_case {
        Address::parse_checksummed(s, None).map_err(|e| e.to_string())
    } else {
        Address::from_str(s).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", s, e))
}
