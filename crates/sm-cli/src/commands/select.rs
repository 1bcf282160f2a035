//! Select command: change the current game.

use std::io::Write;

use anyhow::{Result, bail};
use sm_core::NullSink;

use super::{find_game, open_run, save_run};
use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config, name: &str) -> Result<()> {
    let mut run = open_run(config, NullSink)?;
    let index = find_game(&run, name)?;

    if !run.select_current_game(index) {
        bail!("'{}' takes no more sessions", run.games()[index].name());
    }
    save_run(config, &run)?;

    writeln!(writer, "Current game is now {}", run.games()[index].name())?;
    Ok(())
}
