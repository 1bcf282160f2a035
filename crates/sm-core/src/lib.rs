//! Core domain logic for the splits manager.
//!
//! This crate contains the fundamental types and logic for:
//! - Time: durations and dates with an "unset" sentinel
//! - Games: sessions recorded as splits, state transitions, end date projection
//! - Run: the ordered game list, its totals and the events driving them
//! - Stats: run-wide records and averages
//! - List creation: building a game list from spreadsheet rows

pub mod document;
mod error;
pub mod event;
pub mod game;
pub mod list_creator;
pub mod run;
pub mod split;
pub mod stats;
pub mod time;
pub mod timer;

pub use document::{GameRecord, RunDocument, SessionEntry};
pub use error::RunError;
pub use event::{EventLog, EventSink, NullSink, RunEvent};
pub use game::{
    Game, GameDesc, GameState, GameStats, ParsingInfos, SessionAdded, UnknownGameState,
    visible_delta,
};
pub use list_creator::{FieldSet, ListCreator, SheetField, UnknownSheetField};
pub use run::{Run, RunTotals};
pub use split::Split;
pub use stats::{ComboStat, GlobalAverages, Stats};
pub use time::{DateFormat, SplitDate, SplitTime, TimeFormat};
pub use timer::SessionTimer;
