//! Account storage for vrun
//!
//! A plain directory tree per chain and account, see [`AccountStore`]. Each
//! generated validator key owns an append-only log of user actions whose
//! first line records the key's derivation index.

pub mod account;
pub mod error;
pub mod log;

pub use account::AccountStore;
pub use error::{Result, StorageError};
pub use log::{unix_timestamp, LogEntry, LogEntryType};
