//! Shared utilities for CLI commands.

use anyhow::bail;
use sm_core::{SplitTime, TimeFormat};

/// Formats a delta with an explicit sign.
pub fn format_delta(delta: SplitTime) -> String {
    let sign = if delta.is_negative() { '-' } else { '+' };
    format!("{sign}{}", delta.format(TimeFormat::default().absolute()))
}

/// Parses a duration typed by the user, rejecting anything unreadable.
pub fn parse_time(text: &str) -> anyhow::Result<SplitTime> {
    let time = SplitTime::parse(text);
    if !time.is_valid() {
        bail!("Invalid time: {text}. Use H:MM or HH:MM:SS (e.g. 1:30 or 01:30:00)");
    }
    Ok(time)
}

/// Formats a count of days, singular when needed.
pub fn days(count: u32) -> String {
    if count == 1 {
        "1 day".to_string()
    } else {
        format!("{count} days")
    }
}
