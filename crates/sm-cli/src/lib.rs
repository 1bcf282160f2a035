//! Splits manager CLI library.
//!
//! This crate provides the `splits` command line interface over a run file.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
