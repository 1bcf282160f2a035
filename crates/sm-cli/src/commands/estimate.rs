//! Estimate command: change how long a game is expected to take.

use std::io::Write;

use anyhow::Result;
use sm_core::NullSink;

use super::util::{format_delta, parse_time};
use super::{find_game, open_run, save_run};
use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config, name: &str, time: &str) -> Result<()> {
    let estimate = parse_time(time)?;
    let mut run = open_run(config, NullSink)?;
    let index = find_game(&run, name)?;

    run.set_estimate(index, estimate);
    save_run(config, &run)?;

    let game = &run.games()[index];
    write!(writer, "Estimate of {} is now {estimate}", game.name())?;
    if game.delta().is_valid() {
        write!(writer, " ({})", format_delta(game.delta()))?;
    }
    writeln!(writer)?;
    writeln!(writer, "Estimated final time: {}", run.totals().estimated_final_time)?;
    Ok(())
}
