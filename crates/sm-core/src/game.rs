//! Games, their sessions and per-game projections.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::document::{GameRecord, SessionEntry};
use crate::split::Split;
use crate::stats::{GlobalAverages, ceil_sessions, clamp_days};
use crate::time::{SplitDate, SplitTime};

/// Where a game stands in the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Untouched.
    #[default]
    None,
    /// The game being played right now.
    Current,
    /// Has sessions but is neither current nor over.
    Playing,
    Finished,
    Abandonned,
}

impl GameState {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Current,
        Self::Playing,
        Self::Finished,
        Self::Abandonned,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Current => "Current",
            Self::Playing => "Playing",
            Self::Finished => "Finished",
            Self::Abandonned => "Abandonned",
        }
    }

    /// No session can be added once the game is in this state.
    pub const fn ends_sessions(self) -> bool {
        matches!(self, Self::Finished | Self::Abandonned)
    }

    /// Parses a state name, treating anything unknown as untouched.
    pub fn from_str_lossy(s: &str) -> Self {
        s.trim().parse().unwrap_or_default()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameState {
    type Err = UnknownGameState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" | "none" | "" => Ok(Self::None),
            "Current" | "current" => Ok(Self::Current),
            "Playing" | "playing" | "Ongoing" | "ongoing" => Ok(Self::Playing),
            "Finished" | "finished" => Ok(Self::Finished),
            "Abandonned" | "abandonned" => Ok(Self::Abandonned),
            _ => Err(UnknownGameState(s.to_string())),
        }
    }
}

impl Serialize for GameState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GameState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown game state strings.
#[derive(Debug, Clone)]
pub struct UnknownGameState(String);

impl fmt::Display for UnknownGameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown game state: {}", self.0)
    }
}

impl std::error::Error for UnknownGameState {}

/// Running position while games are read one after another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsingInfos {
    /// Next global split index.
    pub split_index: u32,
    /// Cumulative run time so far.
    pub total_time: SplitTime,
}

/// A game described by a spreadsheet row, before it joins a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameDesc {
    pub name: String,
    pub state: GameState,
    pub estimation: SplitTime,
    /// Time already played, recorded as a single session.
    pub played: SplitTime,
}

impl GameDesc {
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

impl From<GameDesc> for GameRecord {
    fn from(desc: GameDesc) -> Self {
        let sessions = if desc.played.is_valid() {
            vec![desc.played.to_wire()]
        } else {
            Vec::new()
        };
        Self {
            name: desc.name,
            estimate: desc.estimation.to_wire(),
            state: (desc.state != GameState::None).then(|| desc.state.to_string()),
            cover: None,
            sessions,
        }
    }
}

/// Statistics derived from a game's sessions. Never edited directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameStats {
    pub average_session_time: SplitTime,
    pub longest_session: SplitTime,
    pub shortest_session: SplitTime,
    /// Date of the first session.
    pub begin_date: SplitDate,
    /// Number of distinct dates with a session.
    pub played_days: u32,
    /// Average time played on a day with at least one session.
    pub avg_session_played_day: SplitTime,
    pub remaining_played_days: u32,
    pub avg_sessions_per_day: f32,
    pub days_since_start: u32,
    /// Average time per calendar day since the first session.
    pub avg_session_day: SplitTime,
    pub remaining_days: u32,
    pub remaining_sessions: u32,
    /// Projected completion date.
    pub end_date: SplitDate,
}

impl GameStats {
    fn reset_projection(&mut self) {
        self.played_days = 0;
        self.avg_session_played_day = SplitTime::ZERO;
        self.remaining_played_days = 0;
        self.avg_sessions_per_day = 0.0;
        self.days_since_start = 0;
        self.avg_session_day = SplitTime::ZERO;
        self.remaining_days = 0;
        self.remaining_sessions = 0;
        self.end_date = SplitDate::UNSET;
    }
}

/// Outcome of [`Game::add_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionAdded {
    /// Global index of the split that received the session.
    pub split_index: u32,
    /// Whether the game takes no more sessions.
    pub game_finished: bool,
}

/// A game of the run and the sessions played on it.
///
/// `splits` is never empty. While sessions are not over, its last element
/// is the open split waiting for the next session; every other split is
/// closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    name: String,
    cover: Option<String>,
    estimation: SplitTime,
    played: SplitTime,
    delta: SplitTime,
    state: GameState,
    splits: Vec<Split>,
    stats: GameStats,
}

impl Game {
    /// Builds a game from a list creator row.
    pub fn new(desc: GameDesc, parsing: &mut ParsingInfos) -> Self {
        Self::from_record(&GameRecord::from(desc), parsing)
    }

    /// Reads a game record, continuing the run from `parsing`.
    ///
    /// Sessions with an unreadable time are skipped. Games whose sessions
    /// are not over get a trailing open split.
    pub fn from_record(record: &GameRecord, parsing: &mut ParsingInfos) -> Self {
        let name = record.name.trim().to_string();
        let mut state = record
            .state
            .as_deref()
            .map_or(GameState::None, GameState::from_str_lossy);
        let mut splits: Vec<Split> = Vec::with_capacity(record.sessions.len() + 1);

        for text in &record.sessions {
            let SessionEntry { time, date } = SessionEntry::parse(text);
            if !time.is_valid() {
                debug!(game = %name, session = %text, "skipping unreadable session");
                continue;
            }

            parsing.total_time += time;
            splits.push(Split {
                split_index: parsing.split_index,
                session_index: next_session_index(&splits),
                run_time: parsing.total_time,
                segment_time: time,
                date,
            });
            parsing.split_index += 1;
        }

        if splits.is_empty() && state == GameState::Finished {
            warn!(game = %name, "finished game has no session, loading it as untouched");
            state = GameState::None;
        }

        if !state.ends_sessions() || splits.is_empty() {
            splits.push(Split::open(
                parsing.split_index,
                next_session_index(&splits),
                parsing.total_time,
            ));
            parsing.split_index += 1;
        }

        let begin_date = splits.first().map(|s| s.date).unwrap_or_default();
        let mut game = Self {
            name,
            cover: record.cover.clone().filter(|c| !c.is_empty()),
            estimation: SplitTime::parse(&record.estimate),
            played: SplitTime::ZERO,
            delta: SplitTime::ZERO,
            state,
            splits,
            stats: GameStats {
                begin_date,
                ..GameStats::default()
            },
        };
        game.recompute();
        game
    }

    /// Writes the game back into its document shape.
    ///
    /// Sessions are written in order up to the first open split.
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            name: self.name.clone(),
            estimate: self.estimation.to_wire(),
            state: (self.state != GameState::None).then(|| self.state.to_string()),
            cover: self.cover.clone(),
            sessions: self
                .splits
                .iter()
                .take_while(|s| s.is_closed())
                .map(|s| SessionEntry::new(s.segment_time, s.date).to_string())
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cover(&self) -> Option<&str> {
        self.cover.as_deref()
    }

    pub const fn estimation(&self) -> SplitTime {
        self.estimation
    }

    /// Sum of all session times.
    pub const fn played(&self) -> SplitTime {
        self.played
    }

    /// Played minus estimate, unset while it is not shown.
    pub const fn delta(&self) -> SplitTime {
        self.delta
    }

    pub const fn state(&self) -> GameState {
        self.state
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub const fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Closed splits, in order.
    pub fn sessions(&self) -> impl Iterator<Item = &Split> {
        self.splits.iter().filter(|s| s.is_closed())
    }

    pub fn session_count(&self) -> u32 {
        u32::try_from(self.sessions().count()).unwrap_or(u32::MAX)
    }

    /// The split waiting for the next session, if sessions are not over.
    pub fn open_split(&self) -> Option<&Split> {
        self.splits.last().filter(|s| s.is_open())
    }

    pub fn has_sessions(&self) -> bool {
        self.splits.iter().any(Split::is_closed)
    }

    pub const fn are_sessions_over(&self) -> bool {
        self.state.ends_sessions()
    }

    pub fn contains_split_index(&self, index: u32) -> bool {
        match (self.splits.first(), self.splits.last()) {
            (Some(first), Some(last)) => (first.split_index..=last.split_index).contains(&index),
            _ => false,
        }
    }

    /// Last valid run time of the game.
    pub fn run_time(&self) -> SplitTime {
        self.splits
            .iter()
            .rev()
            .map(|s| s.run_time)
            .find(|t| t.is_valid())
            .unwrap_or_default()
    }

    pub fn last_valid_segment_time(&self) -> SplitTime {
        self.sessions().last().map(|s| s.segment_time).unwrap_or_default()
    }

    /// Adds a session played for `time` on `date`, then moves the game to `new_state`.
    ///
    /// The open split receives the session; a new open split follows unless
    /// `new_state` ends the game. Returns `None` without touching anything
    /// when `time` is unset or the game takes no more sessions.
    pub fn add_session(
        &mut self,
        time: SplitTime,
        date: SplitDate,
        new_state: GameState,
    ) -> Option<SessionAdded> {
        if !time.is_valid() || self.are_sessions_over() {
            return None;
        }

        let first_session = !self.has_sessions();
        let open = self.splits.last_mut().filter(|s| s.is_open())?;
        open.run_time += time;
        open.segment_time = time;
        open.date = date;
        let closed = open.clone();

        if first_session {
            self.stats.begin_date = date;
        }

        match new_state {
            GameState::None => {}
            GameState::Playing if self.state == GameState::Current => {}
            state => self.state = state,
        }

        if !self.state.ends_sessions() {
            self.splits.push(Split::open(
                closed.split_index + 1,
                closed.session_index + 1,
                closed.run_time,
            ));
        }

        self.recompute();
        debug!(game = %self.name, time = %time, state = %self.state, "session recorded");

        Some(SessionAdded {
            split_index: closed.split_index,
            game_finished: self.are_sessions_over(),
        })
    }

    /// Shifts the game after a session was added to an earlier game.
    ///
    /// Every split moves by `splits_to_add` positions and `time_to_add` of
    /// run time, the open split's baseline included.
    pub fn update_data(&mut self, time_to_add: SplitTime, splits_to_add: u32) {
        for split in &mut self.splits {
            split.split_index += splits_to_add;
            split.run_time += time_to_add;
        }
        self.recompute();
    }

    pub fn set_estimation(&mut self, estimation: SplitTime) {
        self.estimation = estimation;
        self.recompute();
    }

    /// Recomputes the state from the splits.
    ///
    /// Abandonned is sticky. Otherwise a closed last split means finished,
    /// then the current game, then a game with sessions is playing.
    pub fn refresh_state(&mut self, is_current: bool) {
        if self.state == GameState::Abandonned {
            return;
        }

        let state = if self.splits.last().is_some_and(Split::is_closed) {
            GameState::Finished
        } else if is_current {
            GameState::Current
        } else if self.has_sessions() {
            GameState::Playing
        } else {
            GameState::None
        };

        if state != self.state {
            debug!(game = %self.name, from = %self.state, to = %state, "state changed");
            self.state = state;
            self.recompute();
        }
    }

    /// Projects when the game will be finished.
    ///
    /// Uses the game's own history when it has a begin date, otherwise the
    /// run-wide averages. Projections that would divide by an unset value
    /// are left unset.
    #[allow(
        clippy::cast_precision_loss,
        reason = "session and day counts stay far below f32 precision"
    )]
    pub fn compute_end_date(&mut self, today: SplitDate, global: &GlobalAverages) {
        let played = self.played;
        let remaining = (self.estimation - played).non_negative();
        let session_count = self.session_count();
        let played_days = self.played_days();
        let stats = &mut self.stats;
        stats.reset_projection();

        if stats.begin_date.is_valid() {
            if played_days > 0 {
                stats.played_days = played_days;
                stats.avg_session_played_day = played / played_days;
                if let Some(days) = remaining.ratio(stats.avg_session_played_day) {
                    stats.remaining_played_days = clamp_days(days);
                }
                stats.avg_sessions_per_day = session_count as f32 / played_days as f32;
            }

            stats.days_since_start = clamp_days(stats.begin_date.days_between(today));
            stats.avg_session_day = if stats.days_since_start > 0 {
                played / stats.days_since_start
            } else {
                played
            };
        } else {
            stats.avg_session_day = global.avg_session_day;
            stats.avg_session_played_day = global.avg_session_played_day;
            if let Some(days) = remaining.ratio(stats.avg_session_played_day) {
                stats.remaining_played_days = clamp_days(days);
            }
            stats.avg_sessions_per_day = global.avg_sessions_per_day;
        }

        if let Some(days) = remaining.ratio(stats.avg_session_day) {
            stats.remaining_days = clamp_days(days);
            stats.end_date = today.add_days(i64::from(stats.remaining_days));
        }

        stats.remaining_sessions =
            ceil_sessions(stats.remaining_played_days, stats.avg_sessions_per_day);
    }

    fn played_days(&self) -> u32 {
        let days: BTreeSet<SplitDate> = self
            .sessions()
            .map(|s| s.date)
            .filter(|d| d.is_valid())
            .collect();
        u32::try_from(days.len()).unwrap_or(u32::MAX)
    }

    /// Refreshes every cached value derived from the splits.
    fn recompute(&mut self) {
        self.played = self.sessions().map(|s| s.segment_time).sum();
        self.delta = visible_delta(self.state, self.played, self.estimation);

        let count = self.session_count();
        self.stats.average_session_time = self.played / count;
        self.stats.longest_session = self
            .sessions()
            .map(|s| s.segment_time)
            .max()
            .unwrap_or_default();
        self.stats.shortest_session = self
            .sessions()
            .map(|s| s.segment_time)
            .min()
            .unwrap_or_default();
    }
}

/// Played minus estimate, kept once the game is finished or over its estimate.
///
/// A game still under its estimate shows no delta.
pub fn visible_delta(state: GameState, played: SplitTime, estimation: SplitTime) -> SplitTime {
    let delta = played - estimation;
    if state == GameState::Finished || (state != GameState::None && delta > SplitTime::ZERO) {
        delta
    } else {
        SplitTime::ZERO
    }
}

fn next_session_index(splits: &[Split]) -> u32 {
    splits.last().map_or(1, |s| s.session_index + 1)
}
