//! Session durations and calendar dates.
//!
//! Both types carry an "unset" sentinel instead of wrapping themselves in
//! `Option`: a zero [`SplitTime`] and a default [`SplitDate`] mean "no value",
//! so validity checks double as comparisons against zero throughout the run
//! bookkeeping.

use std::fmt::{self, Write};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Neg, Sub, SubAssign};
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// `H:MM`, `H:MM:SS` or `HHHH:MM:SS.fffffff`.
static TIME_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^(\d{1,4}):(\d{2})(?::(\d{2})(?:\.(\d{1,7}))?)?$").unwrap()
});

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// A signed duration with millisecond granularity.
///
/// [`SplitTime::ZERO`] is the unset value: an open split has a zero segment
/// time, a game without estimate has a zero estimation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SplitTime(i64);

/// Rendering options for [`SplitTime::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFormat {
    /// Drop the sub-second part.
    pub floor_seconds: bool,
    /// Render durations of a day or more as `D.HH:MM:SS`.
    pub separate_days: bool,
    /// Render the magnitude only; the caller handles the sign.
    pub absolute: bool,
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            floor_seconds: true,
            separate_days: false,
            absolute: false,
        }
    }
}

impl TimeFormat {
    /// Keeps milliseconds in the output.
    #[must_use]
    pub const fn precise(mut self) -> Self {
        self.floor_seconds = false;
        self
    }

    #[must_use]
    pub const fn with_days(mut self) -> Self {
        self.separate_days = true;
        self
    }

    #[must_use]
    pub const fn absolute(mut self) -> Self {
        self.absolute = true;
        self
    }
}

impl SplitTime {
    /// The unset duration.
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs * MS_PER_SECOND)
    }

    pub const fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self(hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// A duration is valid when it is not the zero sentinel.
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Clamps negative durations to the unset value.
    #[must_use]
    pub const fn non_negative(self) -> Self {
        if self.0 < 0 { Self::ZERO } else { self }
    }

    /// How many whole `divisor`s fit in `self`.
    ///
    /// Returns `None` when the divisor is unset, so statistics can skip a
    /// projection instead of dividing by zero.
    pub const fn ratio(self, divisor: Self) -> Option<i64> {
        if divisor.0 == 0 {
            None
        } else {
            Some(self.0 / divisor.0)
        }
    }

    /// Parses `H:MM`, `H:MM:SS` or `HHHH:MM:SS[.f]`.
    ///
    /// Malformed text gives the unset value rather than an error.
    pub fn parse(text: &str) -> Self {
        let Some(caps) = TIME_RE.captures(text.trim()) else {
            return Self::ZERO;
        };

        let number = |idx: usize| -> i64 {
            caps.get(idx)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };

        let (hours, minutes, seconds) = (number(1), number(2), number(3));
        if minutes >= 60 || seconds >= 60 {
            return Self::ZERO;
        }

        let millis = caps.get(4).map_or(0, |m| {
            let digits: String = m.as_str().chars().chain("00".chars()).take(3).collect();
            digits.parse().unwrap_or(0)
        });

        Self(Self::from_hms(hours, minutes, seconds).0 + millis)
    }

    pub fn format(self, options: TimeFormat) -> String {
        let total = self.0.unsigned_abs();
        let millis = total % 1_000;
        let total_secs = total / 1_000;
        let seconds = total_secs % 60;
        let minutes = (total_secs / 60) % 60;
        let hours = total_secs / 3_600;

        let mut out = String::new();
        if self.0 < 0 && !options.absolute {
            out.push('-');
        }

        if options.separate_days && hours >= 24 {
            write!(
                out,
                "{}.{:02}:{minutes:02}:{seconds:02}",
                hours / 24,
                hours % 24
            )
            .unwrap();
        } else {
            write!(out, "{hours:02}:{minutes:02}:{seconds:02}").unwrap();
        }

        if !options.floor_seconds {
            write!(out, ".{millis:03}").unwrap();
        }

        out
    }

    /// Text written to documents: floored unless milliseconds are present.
    pub fn to_wire(self) -> String {
        if self.0 % MS_PER_SECOND == 0 {
            self.format(TimeFormat::default())
        } else {
            self.format(TimeFormat::default().precise())
        }
    }
}

impl fmt::Display for SplitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(TimeFormat::default()))
    }
}

impl FromStr for SplitTime {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Add for SplitTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for SplitTime {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for SplitTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for SplitTime {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for SplitTime {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Integer division by a count. Dividing by zero gives the unset value.
impl Div<u32> for SplitTime {
    type Output = Self;

    fn div(self, rhs: u32) -> Self {
        if rhs == 0 {
            Self::ZERO
        } else {
            Self(self.0 / i64::from(rhs))
        }
    }
}

impl Sum for SplitTime {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for SplitTime {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for SplitTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for SplitTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// How dates are rendered for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    /// `2024-01-31`
    #[default]
    #[serde(rename = "iso8601")]
    Iso8601,
    /// `31 January 2024`
    #[serde(rename = "dmy-name")]
    DayMonthName,
}

/// A calendar date; the default value means "no date".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SplitDate(Option<NaiveDate>);

impl SplitDate {
    pub const UNSET: Self = Self(None);

    pub const fn new(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    /// Builds a date from its components; out of range values give the unset date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, month, day))
    }

    pub fn today() -> Self {
        Self(Some(Local::now().date_naive()))
    }

    pub const fn is_valid(self) -> bool {
        self.0.is_some()
    }

    /// Parses `YYYY-MM-DD`; anything else is the unset date.
    pub fn parse(text: &str) -> Self {
        Self(NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok())
    }

    /// Whole days from `self` to `other`, 0 if either is unset.
    pub fn days_between(self, other: Self) -> i64 {
        match (self.0, other.0) {
            (Some(from), Some(to)) => (to - from).num_days(),
            _ => 0,
        }
    }

    #[must_use]
    pub fn add_days(self, days: i64) -> Self {
        let Some(date) = self.0 else {
            return self;
        };
        let shifted = if days >= 0 {
            date.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        Self(shifted)
    }

    pub fn format(self, format: DateFormat) -> String {
        let Some(date) = self.0 else {
            return String::new();
        };
        match format {
            DateFormat::Iso8601 => date.format("%Y-%m-%d").to_string(),
            DateFormat::DayMonthName => date.format("%d %B %Y").to_string(),
        }
    }
}

impl fmt::Display for SplitDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DateFormat::Iso8601))
    }
}

/// Serialized as `YYYY-MM-DD`, or an empty string when unset.
impl Serialize for SplitDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SplitDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

impl From<NaiveDate> for SplitDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}
