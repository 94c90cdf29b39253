//! Append-only validator log entries
//!
//! One JSON object per line: `{"type": ..., "time": ..., "data": ...}`.
//! `data` is an address, a graffiti string, a bool, a validator index, or
//! absent for `exit`.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of user action recorded in a log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogEntryType {
    SetFeeRecipient,
    SetGraffiti,
    SetEnabled,
    Keygen,
    Exit,
}

/// A single log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "type")]
    pub kind: LogEntryType,
    /// Unix seconds
    pub time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl LogEntry {
    fn new(kind: LogEntryType, data: Option<Value>) -> Self {
        Self {
            kind,
            time: unix_timestamp(),
            data,
        }
    }

    /// First entry of every key log
    pub fn keygen(index: u32) -> Self {
        Self::new(LogEntryType::Keygen, Some(Value::from(index)))
    }

    /// Fee recipient, stored in EIP-55 form
    pub fn set_fee_recipient(address: &Address) -> Self {
        Self::new(
            LogEntryType::SetFeeRecipient,
            Some(Value::String(address.to_checksum(None))),
        )
    }

    pub fn set_graffiti(graffiti: &str) -> Self {
        Self::new(
            LogEntryType::SetGraffiti,
            Some(Value::String(graffiti.to_string())),
        )
    }

    pub fn set_enabled(enabled: bool) -> Self {
        Self::new(LogEntryType::SetEnabled, Some(Value::Bool(enabled)))
    }

    pub fn exit() -> Self {
        Self::new(LogEntryType::Exit, None)
    }

    /// Validator index carried by a `keygen` entry
    pub fn keygen_index(&self) -> Option<u32> {
        if self.kind != LogEntryType::Keygen {
            return None;
        }
        self.data
            .as_ref()
            .and_then(Value::as_u64)
            .and_then(|index| u32::try_from(index).ok())
    }
}

/// Current time in Unix seconds
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
