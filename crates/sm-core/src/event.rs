//! Notifications exchanged between the run, its games and the front end.

use serde::{Deserialize, Serialize};

/// Something that happened to the run.
///
/// Games are referred to by their index in the run order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// A session has been added to a game.
    SessionAdded {
        game: usize,
        /// Global index of the split that received the session.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        split: Option<u32>,
        game_finished: bool,
    },
    /// A game has been picked by the user to become the current one.
    NewCurrentGameSelected { game: usize },
    /// The current game is now a different one.
    CurrentGameChanged,
    /// The estimate of a game changed.
    GameEstimateChanged { game: usize },
    /// A whole game list has been read.
    DocumentLoaded,
}

/// Receives every event after the run has processed it.
pub trait EventSink {
    fn notify(&mut self, event: &RunEvent);
}

/// Discards events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &RunEvent) {}
}

/// Records events in delivery order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<RunEvent>,
}

impl EventLog {
    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// Returns the recorded events, leaving the log empty.
    pub fn take(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn notify(&mut self, event: &RunEvent) {
        self.events.push(*event);
    }
}
