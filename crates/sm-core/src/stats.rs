//! Run-wide statistics, recomputed from the whole game list.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::game::{Game, GameState};
use crate::run::RunTotals;
use crate::time::{SplitDate, SplitTime};

/// A record holder: which game (or day) holds it, and by how much.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComboStat {
    pub name: String,
    pub number: u32,
    pub time: SplitTime,
    pub date: SplitDate,
}

impl ComboStat {
    fn game(name: &str, number: u32, time: SplitTime) -> Self {
        Self {
            name: name.to_string(),
            number,
            time,
            date: SplitDate::UNSET,
        }
    }

    fn day(date: SplitDate, number: u32, time: SplitTime) -> Self {
        Self {
            name: date.to_string(),
            number,
            time,
            date,
        }
    }

    /// Whether a holder has been recorded yet.
    pub fn is_set(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Run-wide daily averages, used to project games that have no history.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlobalAverages {
    pub avg_session_day: SplitTime,
    pub avg_session_played_day: SplitTime,
    pub avg_sessions_per_day: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    /// Games with a state other than untouched.
    pub nb_games: u32,
    pub nb_sessions: u32,
    /// Sessions per game.
    pub avg_sessions: f32,
    pub avg_session_time: SplitTime,
    pub avg_sessions_per_day: f32,
    /// Earliest session date of the run.
    pub begin_date: SplitDate,
    pub played_days: u32,
    pub days_since_start: u32,
    pub avg_session_day: SplitTime,
    pub avg_session_played_day: SplitTime,
    pub remaining_played_days: u32,
    pub remaining_days: u32,
    pub remaining_sessions: u32,
    pub end_date: SplitDate,

    pub game_most_sessions: ComboStat,
    /// Highest average session time.
    pub game_longest_sessions: ComboStat,
    /// Longest single session.
    pub game_longest_session: ComboStat,
    pub game_shortest_sessions: ComboStat,
    pub game_shortest_session: ComboStat,
    pub game_most_days: ComboStat,
    pub game_fewest_days: ComboStat,
    pub day_most_sessions: ComboStat,
    pub day_longest_played: ComboStat,
    pub day_shortest_played: ComboStat,
}

impl Stats {
    /// Recomputes everything from `games`.
    ///
    /// Records only change hands on a strictly better value, so the first
    /// game in run order (or the earliest day) keeps a tied record.
    #[allow(
        clippy::cast_precision_loss,
        reason = "session and game counts stay far below f32 precision"
    )]
    pub fn refresh(&mut self, games: &[Game], totals: &RunTotals, today: SplitDate) {
        *self = Self::default();

        let mut days: BTreeMap<SplitDate, (u32, SplitTime)> = BTreeMap::new();
        let mut total_time = SplitTime::ZERO;

        for game in games.iter().filter(|g| g.state() != GameState::None) {
            self.nb_games += 1;

            let mut count = 0_u32;
            let mut game_time = SplitTime::ZERO;
            let mut game_days: Vec<SplitDate> = Vec::new();

            for split in game.sessions() {
                let time = split.segment_time;
                count += 1;
                game_time += time;

                if time > self.game_longest_session.time {
                    self.game_longest_session = ComboStat::game(game.name(), 1, time);
                }
                if !self.game_shortest_session.is_set() || time < self.game_shortest_session.time {
                    self.game_shortest_session = ComboStat::game(game.name(), 1, time);
                }

                if split.date.is_valid() {
                    let day = days.entry(split.date).or_default();
                    day.0 += 1;
                    day.1 += time;
                    if !game_days.contains(&split.date) {
                        game_days.push(split.date);
                    }
                }
            }

            if count == 0 {
                continue;
            }

            self.nb_sessions += count;
            total_time += game_time;
            let average = game_time / count;

            if count > self.game_most_sessions.number {
                self.game_most_sessions = ComboStat::game(game.name(), count, game_time);
            }
            if average > self.game_longest_sessions.time {
                self.game_longest_sessions = ComboStat::game(game.name(), count, average);
            }
            if !self.game_shortest_sessions.is_set() || average < self.game_shortest_sessions.time {
                self.game_shortest_sessions = ComboStat::game(game.name(), count, average);
            }

            let played_days = u32::try_from(game_days.len()).unwrap_or(u32::MAX);
            if played_days > 0 {
                if played_days > self.game_most_days.number {
                    self.game_most_days = ComboStat::game(game.name(), played_days, game_time);
                }
                if !self.game_fewest_days.is_set() || played_days < self.game_fewest_days.number {
                    self.game_fewest_days = ComboStat::game(game.name(), played_days, game_time);
                }
            }
        }

        if self.nb_games == 0 {
            return;
        }

        self.avg_sessions = self.nb_sessions as f32 / self.nb_games as f32;
        self.avg_session_time = total_time / self.nb_sessions;

        for (&date, &(count, time)) in &days {
            if count > self.day_most_sessions.number {
                self.day_most_sessions = ComboStat::day(date, count, time);
            }
            if time > self.day_longest_played.time {
                self.day_longest_played = ComboStat::day(date, count, time);
            }
            if !self.day_shortest_played.is_set() || time < self.day_shortest_played.time {
                self.day_shortest_played = ComboStat::day(date, count, time);
            }
        }

        self.begin_date = days.keys().next().copied().unwrap_or_default();
        self.played_days = u32::try_from(days.len()).unwrap_or(u32::MAX);
        self.project(totals, today);

        debug!(
            games = self.nb_games,
            sessions = self.nb_sessions,
            days = self.played_days,
            "stats refreshed"
        );
    }

    /// Projects the run's end date from its played and remaining totals.
    #[allow(
        clippy::cast_precision_loss,
        reason = "session and day counts stay far below f32 precision"
    )]
    fn project(&mut self, totals: &RunTotals, today: SplitDate) {
        if !self.begin_date.is_valid() {
            return;
        }

        let remaining = totals.remaining_time.non_negative();

        if self.played_days > 0 {
            self.avg_session_played_day = totals.played / self.played_days;
            if let Some(days) = remaining.ratio(self.avg_session_played_day) {
                self.remaining_played_days = clamp_days(days);
            }
            self.avg_sessions_per_day = self.nb_sessions as f32 / self.played_days as f32;
        }

        self.days_since_start = clamp_days(self.begin_date.days_between(today));
        self.avg_session_day = if self.days_since_start > 0 {
            totals.played / self.days_since_start
        } else {
            totals.played
        };

        if let Some(days) = remaining.ratio(self.avg_session_day) {
            self.remaining_days = clamp_days(days);
            self.end_date = today.add_days(i64::from(self.remaining_days));
        }

        self.remaining_sessions = ceil_sessions(self.remaining_played_days, self.avg_sessions_per_day);
    }

    pub const fn averages(&self) -> GlobalAverages {
        GlobalAverages {
            avg_session_day: self.avg_session_day,
            avg_session_played_day: self.avg_session_played_day,
            avg_sessions_per_day: self.avg_sessions_per_day,
        }
    }
}

/// Converts a day count to `u32`, clamping negatives to zero.
pub(crate) fn clamp_days(days: i64) -> u32 {
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

/// Sessions needed to cover `days` played days, rounded up.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "result is clamped to the u32 range before the cast"
)]
pub(crate) fn ceil_sessions(days: u32, per_day: f32) -> u32 {
    let sessions = (days as f32 * per_day).ceil();
    if sessions <= 0.0 {
        0
    } else if sessions >= u32::MAX as f32 {
        u32::MAX
    } else {
        sessions as u32
    }
}
