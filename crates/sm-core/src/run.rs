//! The run: an ordered list of games and the totals derived from it.
//!
//! Every mutation goes through [`Run::dispatch`], which handles the event
//! (possibly queuing follow-up events) and then hands it to the sink. Events
//! raised while handling are delivered after the one that caused them.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::document::RunDocument;
use crate::error::RunError;
use crate::event::{EventSink, NullSink, RunEvent};
use crate::game::{Game, GameState, ParsingInfos};
use crate::stats::Stats;
use crate::time::{SplitDate, SplitTime};

/// Sums over the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    pub estimate: SplitTime,
    pub played: SplitTime,
    /// Sum of the deltas of finished games.
    pub delta: SplitTime,
    /// Time left on games still taking sessions.
    pub remaining_time: SplitTime,
    pub estimated_final_time: SplitTime,
}

#[derive(Debug)]
pub struct Run<S: EventSink = NullSink> {
    title: String,
    games: Vec<Game>,
    current: Option<usize>,
    current_split: u32,
    run_time: SplitTime,
    totals: RunTotals,
    nb_sessions: u32,
    stats: Stats,
    today: SplitDate,
    sink: S,
}

impl Run {
    /// Builds a run that discards its events.
    pub fn from_document(doc: &RunDocument, current_split: Option<u32>) -> Result<Self, RunError> {
        Self::with_sink(doc, current_split, NullSink)
    }
}

impl<S: EventSink> Run<S> {
    /// Builds a run reporting its events to `sink`.
    ///
    /// `current_split` locates the current game when no game is marked
    /// current in the document.
    pub fn with_sink(
        doc: &RunDocument,
        current_split: Option<u32>,
        sink: S,
    ) -> Result<Self, RunError> {
        let mut run = Self {
            title: String::new(),
            games: Vec::new(),
            current: None,
            current_split: 0,
            run_time: SplitTime::ZERO,
            totals: RunTotals::default(),
            nb_sessions: 0,
            stats: Stats::default(),
            today: SplitDate::today(),
            sink,
        };
        run.reload(doc, current_split)?;
        Ok(run)
    }

    /// Pins the date projections are computed from.
    #[must_use]
    pub fn with_today(mut self, today: SplitDate) -> Self {
        self.today = today;
        self.update_run_stats();
        self
    }

    /// Replaces the whole game list.
    ///
    /// On error the run keeps its previous games.
    pub fn reload(&mut self, doc: &RunDocument, current_split: Option<u32>) -> Result<(), RunError> {
        let games = build_games(doc)?;
        let current = games
            .iter()
            .position(|g| g.state() == GameState::Current)
            .or_else(|| current_split.and_then(|index| games.iter().position(|g| g.contains_split_index(index))));

        debug!(title = %doc.title, games = games.len(), ?current, "run loaded");
        self.title.clone_from(&doc.title);
        self.games = games;
        self.current = current;
        self.current_split = 0;
        self.run_time = SplitTime::ZERO;
        self.dispatch(RunEvent::DocumentLoaded);
        Ok(())
    }

    // ========== Actions ==========

    /// Adds a session to the game at `game`.
    ///
    /// Returns `false` when there is no such game, the time is unset or the
    /// game takes no more sessions.
    pub fn add_session(
        &mut self,
        game: usize,
        time: SplitTime,
        date: SplitDate,
        state: GameState,
    ) -> bool {
        let Some(target) = self.games.get_mut(game) else {
            warn!(game, "no game at this position");
            return false;
        };
        let Some(added) = target.add_session(time, date, state) else {
            debug!(game = %target.name(), time = %time, "session ignored");
            return false;
        };

        info!(game = %target.name(), time = %time, date = %date, "session added");
        self.dispatch(RunEvent::SessionAdded {
            game,
            split: Some(added.split_index),
            game_finished: added.game_finished,
        });
        true
    }

    /// Adds a session typed as text.
    ///
    /// An empty or unreadable time does nothing. An empty or unreadable date
    /// leaves the session undated.
    pub fn add_session_text(
        &mut self,
        game: usize,
        time_text: &str,
        date_text: &str,
        state: GameState,
    ) -> bool {
        let time = SplitTime::parse(time_text.trim());
        if !time.is_valid() {
            debug!(text = time_text, "no session time entered");
            return false;
        }
        self.add_session(game, time, SplitDate::parse(date_text), state)
    }

    /// Makes the game at `game` the current one.
    pub fn select_current_game(&mut self, game: usize) -> bool {
        if !self.games.get(game).is_some_and(|g| !g.are_sessions_over()) {
            warn!(game, "game cannot become current");
            return false;
        }
        self.dispatch(RunEvent::NewCurrentGameSelected { game });
        true
    }

    pub fn set_estimate(&mut self, game: usize, estimate: SplitTime) -> bool {
        let Some(target) = self.games.get_mut(game) else {
            warn!(game, "no game at this position");
            return false;
        };
        target.set_estimation(estimate);
        debug!(game = %target.name(), estimate = %estimate, "estimate changed");
        self.dispatch(RunEvent::GameEstimateChanged { game });
        true
    }

    pub fn refresh_stats(&mut self) {
        self.update_run_stats();
    }

    /// Shape of the run for saving.
    pub fn to_document(&self) -> RunDocument {
        RunDocument {
            title: self.title.clone(),
            games: self.games.iter().map(Game::to_record).collect(),
        }
    }

    // ========== Accessors ==========

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn game(&self, index: usize) -> Option<&Game> {
        self.games.get(index)
    }

    /// Position of a game by name; an exact match wins over a case-insensitive one.
    pub fn find_game(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.games
            .iter()
            .position(|g| g.name() == name)
            .or_else(|| self.games.iter().position(|g| g.name().eq_ignore_ascii_case(name)))
    }

    pub const fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_game(&self) -> Option<&Game> {
        self.current.and_then(|i| self.games.get(i))
    }

    /// Global index of the split waiting for the current game's next session.
    pub const fn current_split(&self) -> u32 {
        self.current_split
    }

    pub const fn run_time(&self) -> SplitTime {
        self.run_time
    }

    pub const fn totals(&self) -> &RunTotals {
        &self.totals
    }

    pub const fn nb_sessions(&self) -> u32 {
        self.nb_sessions
    }

    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    pub const fn today(&self) -> SplitDate {
        self.today
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ========== Event handling ==========

    fn dispatch(&mut self, event: RunEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            self.handle(event, &mut queue);
            self.sink.notify(&event);
        }
    }

    fn handle(&mut self, event: RunEvent, queue: &mut VecDeque<RunEvent>) {
        match event {
            RunEvent::SessionAdded {
                game, game_finished, ..
            } => {
                let time = self.games[game].last_valid_segment_time();
                self.update_games_data(game, time, u32::from(!game_finished));
                self.update_run_data(queue);
                self.update_run_stats();
            }
            RunEvent::NewCurrentGameSelected { game } => {
                if !self.games.get(game).is_some_and(|g| !g.are_sessions_over()) {
                    return;
                }
                self.current = Some(game);
                self.update_run_data(queue);
                queue.push_back(RunEvent::CurrentGameChanged);
            }
            RunEvent::CurrentGameChanged => {
                self.refresh_states();
                self.update_run_stats();
            }
            RunEvent::GameEstimateChanged { .. } => self.update_run_stats(),
            RunEvent::DocumentLoaded => {
                self.update_run_data(queue);
                self.update_run_stats();
            }
        }
    }

    /// Shifts every game after `game` by the session just added to it.
    fn update_games_data(&mut self, game: usize, time_to_add: SplitTime, splits_to_add: u32) {
        for later in self.games.iter_mut().skip(game + 1) {
            later.update_data(time_to_add, splits_to_add);
        }
    }

    /// Refreshes states and moves on to the next game once the current one is over.
    fn update_run_data(&mut self, queue: &mut VecDeque<RunEvent>) {
        self.refresh_states();

        let Some(current) = self.current else {
            return;
        };
        if !self.games[current].are_sessions_over() {
            self.sync_current_split();
            return;
        }

        self.current = self
            .games
            .iter()
            .enumerate()
            .skip(current + 1)
            .find(|(_, g)| !g.are_sessions_over())
            .map(|(i, _)| i);
        self.refresh_states();
        self.sync_current_split();

        match self.current_game() {
            Some(game) => info!(game = %game.name(), "current game changed"),
            None => info!("no game left to play"),
        }
        queue.push_back(RunEvent::CurrentGameChanged);
    }

    fn refresh_states(&mut self) {
        let current = self.current;
        for (i, game) in self.games.iter_mut().enumerate() {
            game.refresh_state(current == Some(i));
        }
    }

    fn sync_current_split(&mut self) {
        if let Some(game) = self.current_game() {
            let split = game
                .open_split()
                .or_else(|| game.splits().last())
                .map_or(0, |s| s.split_index);
            let run_time = game.run_time();
            self.current_split = split;
            self.run_time = run_time;
        }
    }

    fn update_run_stats(&mut self) {
        let mut totals = RunTotals::default();
        for game in &self.games {
            totals.estimate += game.estimation();
            totals.played += game.played();
            if game.state() == GameState::Finished {
                totals.delta += game.delta();
            }
            if !game.are_sessions_over() {
                totals.remaining_time += (game.estimation() - game.played()).non_negative();
            }
        }
        totals.estimated_final_time = totals.remaining_time + totals.played;

        self.totals = totals;
        self.nb_sessions = self.games.iter().map(Game::session_count).sum();
        self.stats.refresh(&self.games, &self.totals, self.today);

        let averages = self.stats.averages();
        let today = self.today;
        for game in self.games.iter_mut().filter(|g| !g.are_sessions_over()) {
            game.compute_end_date(today, &averages);
        }
    }
}

fn build_games(doc: &RunDocument) -> Result<Vec<Game>, RunError> {
    let mut parsing = ParsingInfos::default();
    let mut names = HashSet::new();

    doc.games
        .iter()
        .enumerate()
        .map(|(position, record)| {
            let game = Game::from_record(record, &mut parsing);
            if game.name().is_empty() {
                return Err(RunError::EmptyGameName { position });
            }
            if !names.insert(game.name().to_string()) {
                return Err(RunError::DuplicateGame {
                    name: game.name().to_string(),
                });
            }
            Ok(game)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::GameRecord;
    use crate::event::EventLog;

    fn hms(h: i64, m: i64, s: i64) -> SplitTime {
        SplitTime::from_hms(h, m, s)
    }

    fn record(name: &str, estimate: &str, state: Option<&str>, sessions: &[&str]) -> GameRecord {
        GameRecord {
            name: name.to_string(),
            estimate: estimate.to_string(),
            state: state.map(String::from),
            cover: None,
            sessions: sessions.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    fn document(games: Vec<GameRecord>) -> RunDocument {
        RunDocument {
            title: "1 Year 1 Game".into(),
            games,
        }
    }

    fn sample() -> RunDocument {
        document(vec![
            record("Celeste", "02:00:00", Some("Current"), &["01:00:00, 2024-01-01"]),
            record("Gris", "04:00:00", Some("Playing"), &["00:30:00, 2024-01-02"]),
            record("Hades", "20:00:00", None, &[]),
        ])
    }

    fn logged(doc: &RunDocument) -> Run<EventLog> {
        let mut run = Run::with_sink(doc, None, EventLog::default())
            .unwrap()
            .with_today(SplitDate::from_ymd(2024, 1, 10));
        run.sink_mut().take();
        run
    }

    fn assert_run_invariants<S: EventSink>(run: &Run<S>) {
        let indexes: Vec<u32> = run
            .games()
            .iter()
            .flat_map(|g| g.splits().iter().map(|s| s.split_index))
            .collect();
        assert!(
            indexes.windows(2).all(|w| w[0] < w[1]),
            "split indexes must increase: {indexes:?}"
        );

        for game in run.games() {
            if !game.are_sessions_over() {
                assert!(game.open_split().is_some(), "{} lost its open split", game.name());
            }
            let played: SplitTime = game.sessions().map(|s| s.segment_time).sum();
            assert_eq!(game.played(), played);
        }

        let currents = run
            .games()
            .iter()
            .filter(|g| g.state() == GameState::Current)
            .count();
        assert!(currents <= 1);
    }

    #[test]
    fn load_resolves_current_game_from_state() {
        let run = Run::from_document(&sample(), None).unwrap();

        assert_eq!(run.current_index(), Some(0));
        assert_eq!(run.current_split(), 1);
        assert_eq!(run.run_time(), hms(1, 0, 0));
        assert_eq!(run.games()[1].state(), GameState::Playing);
        assert_eq!(run.games()[2].state(), GameState::None);
        assert_eq!(run.nb_sessions(), 2);
        assert_run_invariants(&run);
    }

    #[test]
    fn load_falls_back_to_current_split() {
        let doc = document(vec![
            record("Celeste", "02:00:00", Some("Playing"), &["01:00:00"]),
            record("Gris", "04:00:00", Some("Playing"), &["00:30:00"]),
        ]);
        let run = Run::from_document(&doc, Some(3)).unwrap();

        assert_eq!(run.current_index(), Some(1));
        assert_eq!(run.games()[1].state(), GameState::Current);
        assert_eq!(run.games()[0].state(), GameState::Playing);
    }

    #[test]
    fn load_without_current_game() {
        let doc = document(vec![record("Hades", "20:00:00", None, &[])]);
        let run = Run::from_document(&doc, None).unwrap();

        assert!(run.current_game().is_none());
        assert_eq!(run.games()[0].state(), GameState::None);
    }

    #[test]
    fn extra_current_games_are_demoted() {
        let doc = document(vec![
            record("Celeste", "02:00:00", Some("Current"), &["01:00:00"]),
            record("Gris", "04:00:00", Some("Current"), &["00:30:00"]),
        ]);
        let run = Run::from_document(&doc, None).unwrap();

        assert_eq!(run.current_index(), Some(0));
        assert_eq!(run.games()[1].state(), GameState::Playing);
        assert_run_invariants(&run);
    }

    #[test]
    fn finished_current_game_promotes_next_on_load() {
        let doc = document(vec![
            record("Celeste", "02:00:00", Some("Finished"), &["02:00:00"]),
            record("Gris", "04:00:00", None, &[]),
        ]);
        let run = Run::with_sink(&doc, Some(0), EventLog::default()).unwrap();

        assert_eq!(run.current_index(), Some(1));
        assert_eq!(run.games()[1].state(), GameState::Current);
        assert_eq!(
            run.sink().events(),
            [RunEvent::DocumentLoaded, RunEvent::CurrentGameChanged]
        );
    }

    #[test]
    fn invalid_documents_are_rejected() {
        let duplicate = document(vec![
            record("Celeste", "02:00:00", None, &[]),
            record("Celeste", "04:00:00", None, &[]),
        ]);
        assert_eq!(
            Run::from_document(&duplicate, None).unwrap_err(),
            RunError::DuplicateGame {
                name: "Celeste".into()
            }
        );

        let unnamed = document(vec![record("Celeste", "02:00:00", None, &[]), record("  ", "", None, &[])]);
        assert_eq!(
            Run::from_document(&unnamed, None).unwrap_err(),
            RunError::EmptyGameName { position: 1 }
        );
    }

    #[test]
    fn failed_reload_keeps_previous_run() {
        let mut run = Run::from_document(&sample(), None).unwrap();
        let duplicate = document(vec![
            record("Celeste", "02:00:00", None, &[]),
            record("Celeste", "04:00:00", None, &[]),
        ]);

        assert!(run.reload(&duplicate, None).is_err());
        assert_eq!(run.games().len(), 3);
        assert_eq!(run.current_index(), Some(0));
    }

    #[test]
    fn session_on_current_game_shifts_later_games() {
        let mut run = logged(&sample());
        let gris_before: Vec<u32> = run.games()[1].splits().iter().map(|s| s.split_index).collect();

        assert!(run.add_session(0, hms(0, 30, 0), SplitDate::from_ymd(2024, 1, 3), GameState::Playing));

        let celeste = &run.games()[0];
        assert_eq!(celeste.state(), GameState::Current);
        assert_eq!(celeste.played(), hms(1, 30, 0));
        assert_eq!(run.current_split(), 2);
        assert_eq!(run.run_time(), hms(1, 30, 0));

        let gris = &run.games()[1];
        let gris_after: Vec<u32> = gris.splits().iter().map(|s| s.split_index).collect();
        assert_eq!(gris_after, gris_before.iter().map(|i| i + 1).collect::<Vec<_>>());
        assert_eq!(gris.splits()[0].run_time, hms(2, 0, 0));
        assert_eq!(gris.played(), hms(0, 30, 0));

        assert_eq!(
            run.sink().events(),
            [RunEvent::SessionAdded {
                game: 0,
                split: Some(1),
                game_finished: false,
            }]
        );
        assert_run_invariants(&run);
    }

    #[test]
    fn finishing_current_game_promotes_next() {
        let mut run = logged(&sample());

        assert!(run.add_session(0, hms(1, 0, 0), SplitDate::from_ymd(2024, 1, 3), GameState::Finished));

        assert_eq!(run.games()[0].state(), GameState::Finished);
        assert_eq!(run.current_index(), Some(1));
        assert_eq!(run.games()[1].state(), GameState::Current);

        // Gris keeps its own times; only its position in the run moves.
        let gris = &run.games()[1];
        assert_eq!(gris.played(), hms(0, 30, 0));
        assert_eq!(gris.splits()[0].segment_time, hms(0, 30, 0));
        assert_eq!(gris.splits()[0].split_index, 2);
        assert_eq!(gris.splits()[0].run_time, hms(2, 30, 0));
        assert_eq!(run.current_split(), 3);
        assert_eq!(run.run_time(), hms(2, 30, 0));

        assert_eq!(
            run.sink().events(),
            [
                RunEvent::SessionAdded {
                    game: 0,
                    split: Some(1),
                    game_finished: true,
                },
                RunEvent::CurrentGameChanged,
            ]
        );
        assert_run_invariants(&run);
    }

    #[test]
    fn finishing_last_game_leaves_no_current() {
        let doc = document(vec![record("Celeste", "02:00:00", Some("Current"), &["01:00:00"])]);
        let mut run = Run::from_document(&doc, None).unwrap();

        run.add_session(0, hms(1, 0, 0), SplitDate::UNSET, GameState::Finished);

        assert!(run.current_game().is_none());
        assert_eq!(run.totals().remaining_time, SplitTime::ZERO);
    }

    #[test]
    fn ignored_sessions_emit_nothing() {
        let mut run = logged(&sample());
        let before = run.to_document();

        assert!(!run.add_session(9, hms(1, 0, 0), SplitDate::UNSET, GameState::Playing));
        assert!(!run.add_session_text(0, "", "", GameState::Playing));
        assert!(!run.add_session_text(0, "soon", "", GameState::Playing));

        assert!(run.sink().events().is_empty());
        assert_eq!(run.to_document(), before);
    }

    #[test]
    fn text_session_without_date_stays_undated() {
        let mut run = logged(&sample());

        assert!(run.add_session_text(1, "0:45", "", GameState::Playing));
        assert!(run.add_session_text(2, "1:00", " 2024-01-09 ", GameState::Playing));

        let session = run.games()[1].sessions().last().cloned().unwrap();
        assert_eq!(session.segment_time, hms(0, 45, 0));
        assert!(!session.date.is_valid());
        assert_eq!(run.games()[1].stats().begin_date, SplitDate::from_ymd(2024, 1, 2));

        let hades = run.games()[2].sessions().next().cloned().unwrap();
        assert_eq!(hades.date, SplitDate::from_ymd(2024, 1, 9));
    }

    #[test]
    fn undated_first_session_uses_run_averages() {
        let mut run = logged(&sample());

        assert!(run.add_session_text(2, "1:00", "", GameState::Playing));

        let hades = &run.games()[2];
        assert!(!hades.stats().begin_date.is_valid());
        assert_eq!(hades.stats().avg_session_day, run.stats().avg_session_day);
    }

    #[test]
    fn abandoning_current_game_promotes_next() {
        let mut run = logged(&sample());

        assert!(run.add_session(0, hms(0, 30, 0), SplitDate::from_ymd(2024, 1, 3), GameState::Abandonned));

        let celeste = &run.games()[0];
        assert_eq!(celeste.state(), GameState::Abandonned);
        assert!(celeste.open_split().is_none());
        assert_eq!(celeste.session_count(), 2);
        assert!(!run.add_session(0, hms(0, 10, 0), SplitDate::UNSET, GameState::Playing));

        assert_eq!(run.current_index(), Some(1));
        assert_eq!(run.games()[1].state(), GameState::Current);
        assert_eq!(run.current_split(), 3);
        assert_eq!(run.run_time(), hms(2, 0, 0));
        assert_eq!(
            run.sink().events(),
            [
                RunEvent::SessionAdded {
                    game: 0,
                    split: Some(1),
                    game_finished: true,
                },
                RunEvent::CurrentGameChanged,
            ]
        );
        assert_run_invariants(&run);

        let reloaded = Run::from_document(&run.to_document(), None).unwrap();
        assert_eq!(reloaded.games()[0].state(), GameState::Abandonned);
        assert_eq!(reloaded.current_index(), Some(1));
    }

    #[test]
    fn select_current_game() {
        let mut run = logged(&sample());

        assert!(run.select_current_game(2));

        assert_eq!(run.current_index(), Some(2));
        assert_eq!(run.games()[0].state(), GameState::Playing);
        assert_eq!(run.games()[2].state(), GameState::Current);
        assert_eq!(run.current_split(), 4);
        assert_eq!(
            run.sink().events(),
            [
                RunEvent::NewCurrentGameSelected { game: 2 },
                RunEvent::CurrentGameChanged,
            ]
        );
    }

    #[test]
    fn finished_games_cannot_be_selected() {
        let doc = document(vec![
            record("Celeste", "02:00:00", Some("Finished"), &["02:00:00"]),
            record("Gris", "04:00:00", Some("Current"), &[]),
        ]);
        let mut run = logged(&doc);

        assert!(!run.select_current_game(0));
        assert!(!run.select_current_game(5));
        assert_eq!(run.current_index(), Some(1));
        assert!(run.sink().events().is_empty());
    }

    #[test]
    fn totals_follow_game_states() {
        let doc = document(vec![
            record("Celeste", "02:00:00", Some("Finished"), &["03:00:00"]),
            record("Gris", "04:00:00", Some("Current"), &["01:00:00"]),
            record("Inside", "05:00:00", Some("Abandonned"), &["01:00:00"]),
            record("Hades", "20:00:00", None, &[]),
        ]);
        let run = Run::from_document(&doc, None).unwrap();
        let totals = run.totals();

        assert_eq!(totals.estimate, hms(31, 0, 0));
        assert_eq!(totals.played, hms(5, 0, 0));
        assert_eq!(totals.delta, hms(1, 0, 0));
        assert_eq!(totals.remaining_time, hms(23, 0, 0));
        assert_eq!(totals.estimated_final_time, hms(28, 0, 0));
        assert_eq!(run.nb_sessions(), 3);
    }

    #[test]
    fn estimate_change_updates_totals() {
        let mut run = logged(&sample());

        assert!(run.set_estimate(2, hms(10, 0, 0)));

        assert_eq!(run.games()[2].estimation(), hms(10, 0, 0));
        assert_eq!(run.totals().estimate, hms(16, 0, 0));
        assert_eq!(run.sink().events(), [RunEvent::GameEstimateChanged { game: 2 }]);
    }

    #[test]
    fn untouched_games_get_projected_from_run_averages() {
        let run = logged(&sample());
        let hades = run.games()[2].stats();

        assert_eq!(hades.avg_session_day, run.stats().avg_session_day);
        assert!(hades.end_date.is_valid());
    }

    #[test]
    fn stats_refresh_is_idempotent() {
        let mut run = logged(&sample());
        let stats = run.stats().clone();
        let games = run.games().to_vec();

        run.refresh_stats();

        assert_eq!(run.stats(), &stats);
        assert_eq!(run.games(), games.as_slice());
    }

    #[test]
    fn document_roundtrip() {
        let doc = sample();
        let run = Run::from_document(&doc, None).unwrap();

        assert_eq!(run.to_document(), doc);
    }

    #[test]
    fn find_game_prefers_exact_name() {
        let doc = document(vec![
            record("celeste", "02:00:00", None, &[]),
            record("Celeste", "02:00:00", None, &[]),
        ]);
        let run = Run::from_document(&doc, None).unwrap();

        assert_eq!(run.find_game("Celeste"), Some(1));
        assert_eq!(run.find_game("CELESTE"), Some(0));
        assert_eq!(run.find_game("Gris"), None);
    }
}
