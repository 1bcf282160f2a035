//! Show command: the games of the run, their sessions and the run totals.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use sm_core::{DateFormat, EventSink, GameState, NullSink, Run, RunTotals, SplitDate, SplitTime};

use super::util::{days, format_delta};
use super::open_run;
use crate::Config;

#[derive(Debug, Serialize)]
pub struct JsonRun {
    pub title: String,
    pub current: Option<String>,
    pub current_split: u32,
    pub run_time: SplitTime,
    pub nb_sessions: u32,
    pub totals: RunTotals,
    pub games: Vec<JsonGame>,
}

#[derive(Debug, Serialize)]
pub struct JsonGame {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub state: GameState,
    pub estimate: SplitTime,
    pub played: SplitTime,
    pub delta: SplitTime,
    pub end_date: SplitDate,
    pub sessions: Vec<JsonSession>,
}

#[derive(Debug, Serialize)]
pub struct JsonSession {
    pub time: SplitTime,
    pub date: SplitDate,
}

/// Formats the run as a game list followed by the totals.
pub fn format_run<S: EventSink>(run: &Run<S>, date_format: DateFormat) -> String {
    let mut output = String::new();

    let title = if run.title().is_empty() {
        "Untitled run"
    } else {
        run.title()
    };
    writeln!(output, "{title}").unwrap();
    writeln!(output).unwrap();

    if run.games().is_empty() {
        writeln!(output, "No games in this run.").unwrap();
        return output;
    }

    let width = run
        .games()
        .iter()
        .map(|g| g.name().chars().count())
        .max()
        .unwrap_or(0);

    for (index, game) in run.games().iter().enumerate() {
        let marker = if run.current_index() == Some(index) { '>' } else { ' ' };
        let mut line = format!(
            "{marker} {:<width$}  {:<10}  {} / {}",
            game.name(),
            game.state().as_str(),
            game.played(),
            game.estimation()
        );
        if game.delta().is_valid() {
            write!(line, "  ({})", format_delta(game.delta())).unwrap();
        }
        writeln!(output, "{line}").unwrap();

        for split in game.sessions() {
            let line = format!(
                "      {:>2}. {}  {}",
                split.session_index,
                split.segment_time,
                split.date.format(date_format)
            );
            writeln!(output, "{}", line.trim_end()).unwrap();
        }
    }

    let totals = run.totals();
    writeln!(output).unwrap();
    writeln!(output, "Sessions:  {}", run.nb_sessions()).unwrap();
    writeln!(output, "Played:    {} / {}", totals.played, totals.estimate).unwrap();
    writeln!(output, "Remaining: {}", totals.remaining_time).unwrap();
    writeln!(output, "Final:     {}", totals.estimated_final_time).unwrap();
    writeln!(output, "Delta:     {}", format_delta(totals.delta)).unwrap();

    match run.current_game() {
        Some(game) if game.stats().end_date.is_valid() => {
            writeln!(
                output,
                "Current:   {} (projected end {}, {})",
                game.name(),
                game.stats().end_date.format(date_format),
                days(game.stats().remaining_days)
            )
            .unwrap();
        }
        Some(game) => writeln!(output, "Current:   {}", game.name()).unwrap(),
        None => writeln!(output, "Current:   none").unwrap(),
    }

    output
}

/// Formats the run as JSON.
pub fn format_run_json<S: EventSink>(run: &Run<S>) -> Result<String> {
    let report = JsonRun {
        title: run.title().to_string(),
        current: run.current_game().map(|g| g.name().to_string()),
        current_split: run.current_split(),
        run_time: run.run_time(),
        nb_sessions: run.nb_sessions(),
        totals: *run.totals(),
        games: run
            .games()
            .iter()
            .map(|game| JsonGame {
                name: game.name().to_string(),
                cover: game.cover().map(str::to_string),
                state: game.state(),
                estimate: game.estimation(),
                played: game.played(),
                delta: game.delta(),
                end_date: game.stats().end_date,
                sessions: game
                    .sessions()
                    .map(|s| JsonSession {
                        time: s.segment_time,
                        date: s.date,
                    })
                    .collect(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&report).context("failed to serialize run")
}

/// Runs the show command.
pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let run = open_run(config, NullSink)?;

    if json {
        writeln!(writer, "{}", format_run_json(&run)?)?;
    } else {
        write!(writer, "{}", format_run(&run, config.date_format))?;
    }

    Ok(())
}
