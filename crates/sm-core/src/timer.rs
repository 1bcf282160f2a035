//! Stopwatch measuring a play session before it is added to a game.

use std::time::{Duration, Instant};

use crate::time::SplitTime;

/// Measures a session that can be paused and resumed.
///
/// Each operation has an `_at` form taking the instant explicitly.
#[derive(Debug, Clone, Default)]
pub struct SessionTimer {
    /// Start of the running stretch, `None` while paused or stopped.
    started_at: Option<Instant>,
    /// Time of the stretches already completed.
    accumulated: Duration,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh measure, discarding any previous one.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        self.accumulated = Duration::ZERO;
        self.started_at = Some(now);
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn pause_at(&mut self, now: Instant) {
        if let Some(start) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(start);
        }
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    pub fn resume_at(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Ends the measure and returns the session time.
    ///
    /// A timer that never ran gives the unset time.
    pub fn stop(&mut self) -> SplitTime {
        self.stop_at(Instant::now())
    }

    pub fn stop_at(&mut self, now: Instant) -> SplitTime {
        let elapsed = self.elapsed_at(now);
        *self = Self::default();
        elapsed
    }

    pub fn elapsed(&self) -> SplitTime {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> SplitTime {
        let running = self
            .started_at
            .map_or(Duration::ZERO, |start| now.saturating_duration_since(start));
        to_split_time(self.accumulated + running)
    }

    pub const fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}

fn to_split_time(duration: Duration) -> SplitTime {
    SplitTime::from_millis(i64::try_from(duration.as_millis()).unwrap_or(i64::MAX))
}
