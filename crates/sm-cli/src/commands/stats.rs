//! Stats command: averages, records and the projected end of the run.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use sm_core::{ComboStat, DateFormat, NullSink, Stats};

use super::open_run;
use super::util::days;
use crate::Config;

fn sessions(count: u32) -> String {
    if count == 1 {
        "1 session".to_string()
    } else {
        format!("{count} sessions")
    }
}

/// One record line; `detail` describes the holder.
fn record(output: &mut String, label: &str, stat: &ComboStat, detail: impl FnOnce(&ComboStat) -> String) {
    let holder = if stat.is_set() {
        detail(stat)
    } else {
        "-".to_string()
    };
    writeln!(output, "  {label:<19} {holder}").unwrap();
}

/// Formats run statistics for the terminal.
pub fn format_stats(stats: &Stats, date_format: DateFormat) -> String {
    let mut output = String::new();

    if stats.nb_games == 0 {
        writeln!(output, "No games played yet.").unwrap();
        return output;
    }

    // ========== Averages ==========
    writeln!(output, "Games:           {} ({})", stats.nb_games, sessions(stats.nb_sessions)).unwrap();
    writeln!(output, "Sessions/game:   {:.1}", stats.avg_sessions).unwrap();
    writeln!(output, "Avg session:     {}", stats.avg_session_time).unwrap();

    if stats.begin_date.is_valid() {
        writeln!(
            output,
            "Began:           {} ({} ago)",
            stats.begin_date.format(date_format),
            days(stats.days_since_start)
        )
        .unwrap();
        writeln!(
            output,
            "Played days:     {} ({:.1} sessions per day)",
            stats.played_days, stats.avg_sessions_per_day
        )
        .unwrap();
        writeln!(output, "Per played day:  {}", stats.avg_session_played_day).unwrap();
        writeln!(output, "Per day:         {}", stats.avg_session_day).unwrap();
        writeln!(
            output,
            "Remaining:       {} played, {}",
            days(stats.remaining_played_days),
            sessions(stats.remaining_sessions)
        )
        .unwrap();
    }
    if stats.end_date.is_valid() {
        writeln!(
            output,
            "Projected end:   {} ({})",
            stats.end_date.format(date_format),
            days(stats.remaining_days)
        )
        .unwrap();
    }

    // ========== Records ==========
    writeln!(output).unwrap();
    writeln!(output, "Records").unwrap();
    record(&mut output, "Most sessions:", &stats.game_most_sessions, |s| {
        format!("{} ({})", s.name, sessions(s.number))
    });
    record(&mut output, "Longest sessions:", &stats.game_longest_sessions, |s| {
        format!("{} ({} avg)", s.name, s.time)
    });
    record(&mut output, "Longest session:", &stats.game_longest_session, |s| {
        format!("{} ({})", s.name, s.time)
    });
    record(&mut output, "Shortest sessions:", &stats.game_shortest_sessions, |s| {
        format!("{} ({} avg)", s.name, s.time)
    });
    record(&mut output, "Shortest session:", &stats.game_shortest_session, |s| {
        format!("{} ({})", s.name, s.time)
    });
    record(&mut output, "Most days:", &stats.game_most_days, |s| {
        format!("{} ({})", s.name, days(s.number))
    });
    record(&mut output, "Fewest days:", &stats.game_fewest_days, |s| {
        format!("{} ({})", s.name, days(s.number))
    });
    record(&mut output, "Busiest day:", &stats.day_most_sessions, |s| {
        format!("{} ({})", s.date.format(date_format), sessions(s.number))
    });
    record(&mut output, "Longest day:", &stats.day_longest_played, |s| {
        format!("{} ({})", s.date.format(date_format), s.time)
    });
    record(&mut output, "Shortest day:", &stats.day_shortest_played, |s| {
        format!("{} ({})", s.date.format(date_format), s.time)
    });

    output
}

/// Runs the stats command.
pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let run = open_run(config, NullSink)?;

    if json {
        let text = serde_json::to_string_pretty(run.stats()).context("failed to serialize stats")?;
        writeln!(writer, "{text}")?;
    } else {
        write!(writer, "{}", format_stats(run.stats(), config.date_format))?;
    }

    Ok(())
}
