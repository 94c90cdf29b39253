//! vrun: validator key management for staking accounts
//!
//! Each account (an EIP-55 withdrawal address on one chain) owns a random
//! seed. Validator keys are derived from it along EIP-2334 paths, claimed
//! through an append-only log per key, and exported as EIP-2335 keystores.

pub mod commands;
pub mod config;

pub use commands::{execute, Command};
pub use config::{parse_address, Chain, Config, CHAIN_ENV, DEFAULT_DB_DIR, VRUN_DB_ENV};
