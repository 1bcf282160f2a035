//! One recorded (or pending) session of a game.

use crate::time::{SplitDate, SplitTime};

/// A session slot inside a [`Game`](crate::Game).
///
/// A split whose segment time is unset is *open*: it stands for the next
/// session to be played. Its run time then holds the baseline, i.e. the
/// cumulative run time of everything before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    /// Position across the whole run, in run order.
    pub split_index: u32,
    /// 1-based position within the owning game.
    pub session_index: u32,
    /// Cumulative run time up to and including this split.
    pub run_time: SplitTime,
    /// Duration of this session alone.
    pub segment_time: SplitTime,
    pub date: SplitDate,
}

impl Split {
    /// Creates the open slot for the next session.
    pub const fn open(split_index: u32, session_index: u32, baseline: SplitTime) -> Self {
        Self {
            split_index,
            session_index,
            run_time: baseline,
            segment_time: SplitTime::ZERO,
            date: SplitDate::UNSET,
        }
    }

    pub const fn is_closed(&self) -> bool {
        self.segment_time.is_valid()
    }

    pub const fn is_open(&self) -> bool {
        !self.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_split_has_no_segment() {
        let split = Split::open(4, 1, SplitTime::from_hms(3, 0, 0));
        assert!(split.is_open());
        assert!(!split.segment_time.is_valid());
        assert_eq!(split.run_time, SplitTime::from_hms(3, 0, 0));
    }

    #[test]
    fn split_with_segment_is_closed() {
        let split = Split {
            split_index: 2,
            session_index: 3,
            run_time: SplitTime::from_hms(5, 0, 0),
            segment_time: SplitTime::from_hms(1, 30, 0),
            date: SplitDate::from_ymd(2024, 2, 1),
        };
        assert!(split.is_closed());
        assert!(!split.is_open());
    }
}
