//! Add command: record a play session.

use std::io::Write;

use anyhow::{Context, Result, bail};
use sm_core::{EventLog, GameState, RunEvent, SplitDate};

use super::util::parse_time;
use super::{find_game, open_run, save_run};
use crate::Config;

/// Adds a session to `game`, or to the current game, and saves the run.
///
/// Without `date` the session is dated today.
pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    time: &str,
    date: Option<&str>,
    state: GameState,
    game: Option<&str>,
    json: bool,
) -> Result<()> {
    let session_time = parse_time(time)?;
    if let Some(text) = date.filter(|text| !SplitDate::parse(text).is_valid()) {
        bail!("Invalid date: {text}. Use YYYY-MM-DD (e.g. 2024-01-31)");
    }

    let mut run = open_run(config, EventLog::default())?;
    run.sink_mut().take();

    let index = match game {
        Some(name) => find_game(&run, name)?,
        None => run
            .current_index()
            .context("no current game: pass --game or run 'splits select <NAME>'")?,
    };
    let name = run.games()[index].name().to_string();

    let date_text = date.map_or_else(|| run.today().to_string(), str::to_string);
    if !run.add_session_text(index, time, &date_text, state) {
        bail!("'{name}' takes no more sessions");
    }
    save_run(config, &run)?;

    let events = run.sink_mut().take();
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&events)?)?;
        return Ok(());
    }

    let game = &run.games()[index];
    writeln!(
        writer,
        "Added {session_time} to {name} ({} / {}, {})",
        game.played(),
        game.estimation(),
        game.state()
    )?;
    if events.contains(&RunEvent::CurrentGameChanged) {
        match run.current_game() {
            Some(current) => writeln!(writer, "Current game is now {}", current.name())?,
            None => writeln!(writer, "No game left to play")?,
        }
    }

    Ok(())
}
