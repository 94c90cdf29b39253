//! Filesystem account store
//!
//! Layout under the database root:
//!
//! ```text
//! {root}/{chain_id}/{address}/init           Unix timestamp, written once
//! {root}/{chain_id}/{address}/seed           32 raw bytes, written once
//! {root}/{chain_id}/{address}/{pubkey}/log   JSON lines of LogEntry
//! ```
//!
//! Addresses are EIP-55 checksummed; pubkeys are lowercase `0x` hex. Files
//! that must only be written once are opened with `create_new`, which also
//! serializes concurrent `keygen` runs racing for the same index.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use tracing::{debug, info};
use vrun_crypto::{PublicKey, Seed, SEED_SIZE};

use crate::error::{Result, StorageError};
use crate::log::{unix_timestamp, LogEntry, LogEntryType};

const INIT_FILE: &str = "init";
const SEED_FILE: &str = "seed";
const LOG_FILE: &str = "log";

/// Accounts of one chain
#[derive(Debug, Clone)]
pub struct AccountStore {
    root: PathBuf,
    chain_id: u64,
}

impl AccountStore {
    /// Open the store for `chain_id` below `db_root`
    ///
    /// Nothing is created until an account is initialized.
    pub fn new(db_root: impl Into<PathBuf>, chain_id: u64) -> Self {
        Self {
            root: db_root.into(),
            chain_id,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// `{root}/{chain_id}/{address}`
    pub fn account_dir(&self, address: &Address) -> PathBuf {
        self.root
            .join(self.chain_id.to_string())
            .join(address.to_checksum(None))
    }

    fn key_dir(&self, address: &Address, pubkey: &PublicKey) -> PathBuf {
        self.account_dir(address).join(pubkey.to_hex())
    }

    fn log_path(&self, address: &Address, pubkey: &PublicKey) -> PathBuf {
        self.key_dir(address, pubkey).join(LOG_FILE)
    }

    /// Create the account directory, its init timestamp and a fresh seed
    ///
    /// Fails with [`StorageError::AlreadyExists`] if the account was already
    /// initialized.
    pub fn init_account(&self, address: &Address) -> Result<()> {
        let dir = self.account_dir(address);
        fs::create_dir_all(&dir)?;

        // The init marker is written last so an account never has one without a seed.
        let seed_path = dir.join(SEED_FILE);
        let seed = Seed::generate();
        let mut file = create_new_private(&seed_path)?;
        if let Err(e) = file.write_all(seed.expose_secret()).and_then(|_| file.sync_all()) {
            let _ = fs::remove_file(&seed_path);
            return Err(e.into());
        }

        let mut init = create_new(&dir.join(INIT_FILE))?;
        init.write_all(unix_timestamp().to_string().as_bytes())?;

        info!(chain_id = self.chain_id, %address, "initialized account");
        Ok(())
    }

    /// Load the account seed
    pub fn read_seed(&self, address: &Address) -> Result<Seed> {
        let path = self.account_dir(address).join(SEED_FILE);
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::AccountNotFound(address.to_checksum(None)),
            _ => StorageError::Io(e),
        })?;

        if bytes.len() != SEED_SIZE {
            return Err(StorageError::InvalidSeedLength(bytes.len()));
        }
        Ok(Seed::from_slice(&bytes)?)
    }

    /// Whether a log exists for `pubkey`
    pub fn has_key(&self, address: &Address, pubkey: &PublicKey) -> bool {
        self.log_path(address, pubkey).is_file()
    }

    /// Claim `pubkey` by writing its log with a `keygen` entry for `index`
    ///
    /// Fails with [`StorageError::AlreadyExists`] if the log is already there.
    pub fn create_key(&self, address: &Address, pubkey: &PublicKey, index: u32) -> Result<()> {
        let dir = self.key_dir(address, pubkey);
        fs::create_dir_all(&dir)?;

        let mut file = create_new(&dir.join(LOG_FILE))?;
        write_entry(&mut file, &LogEntry::keygen(index))?;

        debug!(%pubkey, index, "created key log");
        Ok(())
    }

    /// Append an entry to an existing key log
    pub fn append_log(&self, address: &Address, pubkey: &PublicKey, entry: &LogEntry) -> Result<()> {
        let path = self.log_path(address, pubkey);
        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|e| not_found_as_key(e, pubkey))?;
        write_entry(&mut file, entry)?;

        debug!(%pubkey, kind = ?entry.kind, "appended log entry");
        Ok(())
    }

    /// All entries of a key log, oldest first
    pub fn read_log(&self, address: &Address, pubkey: &PublicKey) -> Result<Vec<LogEntry>> {
        let path = self.log_path(address, pubkey);
        let file = File::open(&path).map_err(|e| not_found_as_key(e, pubkey))?;

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(parse_line(&path, &line)?);
        }
        Ok(entries)
    }

    /// Validator index recorded in the first line of a key log
    pub fn keygen_index(&self, address: &Address, pubkey: &PublicKey) -> Result<u32> {
        let path = self.log_path(address, pubkey);
        let file = File::open(&path).map_err(|e| not_found_as_key(e, pubkey))?;

        let mut first = String::new();
        BufReader::new(file).read_line(&mut first)?;
        if first.trim().is_empty() {
            return Err(malformed(&path, "log is empty"));
        }

        let entry = parse_line(&path, &first)?;
        if entry.kind != LogEntryType::Keygen {
            return Err(malformed(&path, "first entry is not keygen"));
        }
        entry
            .keygen_index()
            .ok_or_else(|| malformed(&path, "keygen entry has no valid index"))
    }

    /// Pubkeys with a log under the account, sorted
    pub fn list_keys(&self, address: &Address) -> Result<Vec<PublicKey>> {
        let dir = self.account_dir(address);
        let entries = fs::read_dir(&dir).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::AccountNotFound(address.to_checksum(None)),
            _ => StorageError::Io(e),
        })?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if let Ok(pubkey) = name.parse::<PublicKey>() {
                if entry.path().join(LOG_FILE).is_file() {
                    keys.push(pubkey);
                }
            }
        }
        keys.sort_by_key(|k| k.to_bytes());
        Ok(keys)
    }
}

fn create_new(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.to_path_buf()),
            _ => StorageError::Io(e),
        })
}

/// Like [`create_new`] with owner-only permissions on Unix
fn create_new_private(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    options.open(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.to_path_buf()),
        _ => StorageError::Io(e),
    })
}

fn write_entry(file: &mut File, entry: &LogEntry) -> Result<()> {
    let mut line = serde_json::to_string(entry)?;
    line.push('\n');
    file.write_all(line.as_bytes())?;
    Ok(())
}

fn parse_line(path: &Path, line: &str) -> Result<LogEntry> {
    serde_json::from_str(line).map_err(|e| malformed(path, &e.to_string()))
}

fn malformed(path: &Path, reason: &str) -> StorageError {
    StorageError::MalformedLog {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn not_found_as_key(e: io::Error, pubkey: &PublicKey) -> StorageError {
    match e.kind() {
        io::ErrorKind::NotFound => StorageError::KeyNotFound(pubkey.to_hex()),
        _ => StorageError::Io(e),
    }
}
