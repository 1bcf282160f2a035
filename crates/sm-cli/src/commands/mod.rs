//! CLI subcommand implementations.

pub mod add;
pub mod convert;
pub mod create;
pub mod estimate;
pub mod select;
pub mod show;
pub mod stats;
mod util;

use anyhow::{Context, Result};
use sm_core::{EventSink, Run};

use crate::Config;

/// Loads the configured run file.
pub fn open_run<S: EventSink>(config: &Config, sink: S) -> Result<Run<S>> {
    let doc = sm_store::load(&config.run_path)
        .with_context(|| format!("failed to load {}", config.run_path.display()))?;
    let run = Run::with_sink(&doc, config.current_split, sink)
        .with_context(|| format!("invalid game list in {}", config.run_path.display()))?;
    tracing::debug!(games = run.games().len(), current = ?run.current_index(), "run opened");
    Ok(run)
}

/// Writes the run back to the configured run file.
pub fn save_run<S: EventSink>(config: &Config, run: &Run<S>) -> Result<()> {
    sm_store::save(&config.run_path, &run.to_document())
        .with_context(|| format!("failed to save {}", config.run_path.display()))
}

/// Position of a game by name, or an error naming it.
fn find_game<S: EventSink>(run: &Run<S>, name: &str) -> Result<usize> {
    run.find_game(name)
        .with_context(|| format!("no game named '{name}' in the run"))
}
