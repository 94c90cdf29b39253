//! Account and validator key commands
//!
//! - `init`: create an account and its seed
//! - `keygen`: claim the next free validator index
//! - `set-fee-recipient`, `set-graffiti`, `set-enabled`, `exit`: record user
//!   actions in a key's log
//! - `keystore`: export a signing key as an EIP-2335 keystore
//! - `test`: run the built-in known-answer checks
//!
//! Results go to stdout; diagnostics go through `tracing` to stderr.

pub mod actions;
pub mod init;
pub mod keygen;
pub mod keystore;
pub mod selftest;

use alloy_primitives::Address;
use anyhow::Result;
use clap::Subcommand;
use vrun_crypto::PublicKey;
use vrun_storage::LogEntry;

use crate::config::{parse_address, Config};

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account directory with a fresh random seed
    Init {
        /// Withdrawal account address
        #[arg(long, env = "ADDRESS", value_parser = parse_address)]
        address: Address,
    },

    /// Generate the next validator key of an account
    ///
    /// Starting at --index, the first index whose signing key has no log yet
    /// is claimed.
    Keygen {
        #[arg(long, env = "ADDRESS", value_parser = parse_address)]
        address: Address,

        /// First index to try
        #[arg(long, env = "INDEX", default_value = "0")]
        index: u32,
    },

    /// Record a fee recipient for a validator
    SetFeeRecipient {
        #[arg(long, env = "ADDRESS", value_parser = parse_address)]
        address: Address,

        /// Validator public key
        #[arg(long, env = "PUBKEY")]
        pubkey: PublicKey,

        /// Fee recipient address
        #[arg(long, env = "DATA", value_parser = parse_address)]
        data: Address,
    },

    /// Record a graffiti string for a validator
    SetGraffiti {
        #[arg(long, env = "ADDRESS", value_parser = parse_address)]
        address: Address,

        #[arg(long, env = "PUBKEY")]
        pubkey: PublicKey,

        /// Graffiti, at most 32 bytes of UTF-8
        #[arg(long, env = "DATA")]
        data: String,
    },

    /// Record whether a validator should be running
    SetEnabled {
        #[arg(long, env = "ADDRESS", value_parser = parse_address)]
        address: Address,

        #[arg(long, env = "PUBKEY")]
        pubkey: PublicKey,

        #[arg(long, env = "DATA", action = clap::ArgAction::Set)]
        data: bool,
    },

    /// Export a validator signing key as an EIP-2335 keystore
    ///
    /// Prints {"keystore": ..., "password": ...} as JSON.
    Keystore {
        #[arg(long, env = "ADDRESS", value_parser = parse_address)]
        address: Address,

        /// Validator public key, used to look up the index when --index is absent
        #[arg(long, env = "PUBKEY", required_unless_present = "index")]
        pubkey: Option<PublicKey>,

        /// Validator index
        #[arg(long, env = "INDEX")]
        index: Option<u32>,
    },

    /// Record a voluntary exit request for a validator
    Exit {
        #[arg(long, env = "ADDRESS", value_parser = parse_address)]
        address: Address,

        #[arg(long, env = "PUBKEY")]
        pubkey: PublicKey,
    },

    /// Run the key derivation known-answer checks
    Test,
}

/// Execute a command
pub fn execute(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Init { address } => {
            init::execute(config, &address)?;
            println!("Initialized {} on {}", address.to_checksum(None), config.chain);
        }

        Command::Keygen { address, index } => {
            let (pubkey, index) = keygen::execute(config, &address, index)?;
            println!(
                "Added pubkey {} at index {} for {} on {}",
                pubkey,
                index,
                address.to_checksum(None),
                config.chain
            );
        }

        Command::SetFeeRecipient {
            address,
            pubkey,
            data,
        } => actions::execute(config, &address, &pubkey, LogEntry::set_fee_recipient(&data))?,

        Command::SetGraffiti {
            address,
            pubkey,
            data,
        } => {
            actions::validate_graffiti(&data)?;
            actions::execute(config, &address, &pubkey, LogEntry::set_graffiti(&data))?
        }

        Command::SetEnabled {
            address,
            pubkey,
            data,
        } => actions::execute(config, &address, &pubkey, LogEntry::set_enabled(data))?,

        Command::Exit { address, pubkey } => {
            actions::execute(config, &address, &pubkey, LogEntry::exit())?
        }

        Command::Keystore {
            address,
            pubkey,
            index,
        } => {
            let generated = keystore::execute(config, &address, pubkey.as_ref(), index)?;
            println!("{}", generated.to_json()?);
        }

        Command::Test => {
            for line in selftest::execute()? {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
