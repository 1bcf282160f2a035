use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sm_cli::commands::{add, convert, create, estimate, select, show, stats};
use sm_cli::{Cli, Commands, Config};

/// Load config, applying the `--file` override.
fn load_config(cli: &Cli) -> Result<Config> {
    let config = Config::load_from(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_run_path(cli.file.clone());
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Show { json }) => {
            let config = load_config(&cli)?;
            show::run(&mut stdout, &config, *json)?;
        }
        Some(Commands::Add {
            time,
            date,
            state,
            game,
            json,
        }) => {
            let config = load_config(&cli)?;
            add::run(
                &mut stdout,
                &config,
                time,
                date.as_deref(),
                *state,
                game.as_deref(),
                *json,
            )?;
        }
        Some(Commands::Select { name }) => {
            let config = load_config(&cli)?;
            select::run(&mut stdout, &config, name)?;
        }
        Some(Commands::Estimate { name, time }) => {
            let config = load_config(&cli)?;
            estimate::run(&mut stdout, &config, name, time)?;
        }
        Some(Commands::Stats { json }) => {
            let config = load_config(&cli)?;
            stats::run(&mut stdout, &config, *json)?;
        }
        Some(Commands::Create {
            input,
            fields,
            no_merge_year,
            title,
            output,
        }) => {
            // Create doesn't need config - it writes wherever it is told
            let text = create::read_input(input.as_deref())?;
            create::run(
                &mut stdout,
                &text,
                fields.unwrap_or_default(),
                !no_merge_year,
                title,
                output,
            )?;
        }
        Some(Commands::Convert { input, output }) => {
            convert::run(&mut stdout, input, output)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    stdout.flush()?;
    Ok(())
}
