//! Shape of the game list documents exchanged with the storage layer.
//!
//! The core only sees this shape; how it is laid out on disk (JSON keys,
//! LiveSplit XML tags) belongs to `sm-store`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::{SplitDate, SplitTime};

/// A whole run: its title and games in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

/// One game as stored in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameRecord {
    pub name: String,
    /// Estimate as a time string (`HH:MM:SS`).
    #[serde(default)]
    pub estimate: String,
    /// State name; absent for untouched games.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Opaque cover blob, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Played sessions as `HH:MM:SS[, YYYY-MM-DD]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sessions: Vec<String>,
}

/// A session string split into its time and optional date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionEntry {
    pub time: SplitTime,
    pub date: SplitDate,
}

impl SessionEntry {
    pub const fn new(time: SplitTime, date: SplitDate) -> Self {
        Self { time, date }
    }

    /// Parses `HH:MM:SS[, YYYY-MM-DD]`; unreadable parts are left unset.
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split(',');
        let time = parts.next().map(SplitTime::parse).unwrap_or_default();
        let date = parts.next().map(SplitDate::parse).unwrap_or_default();
        Self { time, date }
    }
}

impl fmt::Display for SessionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.time.to_wire())?;
        if self.date.is_valid() {
            write!(f, ", {}", self.date)?;
        }
        Ok(())
    }
}
