//! Wire format for saved minelog sessions.
//!
//! These types only describe the shape of the data. Whether a save is
//! consistent (mine count, bounds, known verbs) is decided by the engine when
//! it restores one.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Verbs recorded in a session log.
pub mod verb {
    pub const POKE: &str = "poke";
    pub const FLAG: &str = "flag";
    pub const VALIDATE: &str = "validate";
    pub const CHEAT: &str = "cheat";
}

/// Everything needed to rebuild a session: its configuration, the exact mine
/// layout, the elapsed time and every player action in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    pub height: u16,
    pub width: u16,
    pub classic: bool,
    pub number_of_mines: u32,
    pub bomb_locations: Vec<BombLocation>,
    #[serde(default)]
    pub time: u32,
    #[serde(default)]
    pub log: Vec<LogEntry>,
}

impl SavedSession {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BombLocation {
    pub row: u16,
    pub column: u16,
}

/// One logged action, serialized as `[verb, [args...]]`.
///
/// Arguments are kept as plain integers so that a log can be read back even
/// when it holds values the engine would reject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry(pub String, #[serde(default)] pub Vec<i64>);

impl LogEntry {
    pub fn new(verb: impl Into<String>, args: Vec<i64>) -> Self {
        Self(verb.into(), args)
    }

    pub fn verb(&self) -> &str {
        &self.0
    }

    pub fn args(&self) -> &[i64] {
        &self.1
    }
}
