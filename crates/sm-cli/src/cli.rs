//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sm_core::{FieldSet, GameState};

/// Splits manager for "1 Year 1 Game" runs.
///
/// Records play sessions against a list of games, keeps the run totals up to
/// date and projects when each game will be finished.
#[derive(Debug, Parser)]
#[command(name = "splits", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Run file to use instead of the configured one.
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the games of the run and their sessions.
    Show {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add a play session to the current game.
    Add {
        /// Session length (e.g. 1:30 or 01:30:00).
        time: String,

        /// Day the session was played (YYYY-MM-DD, defaults to today).
        #[arg(long)]
        date: Option<String>,

        /// State of the game after the session (Playing, Finished, Abandonned).
        #[arg(long, default_value = "Playing")]
        state: GameState,

        /// Game to add the session to instead of the current one.
        #[arg(long)]
        game: Option<String>,

        /// Print the resulting events as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Make a game the current one.
    Select {
        /// Game name.
        name: String,
    },

    /// Change the estimate of a game.
    Estimate {
        /// Game name.
        name: String,

        /// New estimate (e.g. 20:00 or 20:00:00).
        time: String,
    },

    /// Show statistics over the whole run.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Create a run from spreadsheet rows pasted as tab-separated text.
    Create {
        /// File with the rows (defaults to stdin).
        #[arg(long)]
        input: Option<PathBuf>,

        /// Columns present in the rows, comma-separated
        /// (state, year, name, type, platform, version, estimate, played).
        #[arg(long)]
        fields: Option<FieldSet>,

        /// Keep the year out of game names.
        #[arg(long)]
        no_merge_year: bool,

        /// Title of the run.
        #[arg(long, default_value = "1 Year 1 Game")]
        title: String,

        /// Run file to write (`.json` or `.lss`).
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a run file between JSON and LiveSplit formats.
    Convert {
        /// File to read.
        input: PathBuf,

        /// File to write.
        output: PathBuf,
    },
}
