//! tstoy settings resource CLI
//!
//! Reads, tests and enforces the machine and user settings files of tstoy,
//! printing JSON to stdout.

mod cli;
mod commands;
mod error;
mod input;
mod logging;

use std::io::{self, Write};

use clap::Parser;
use colored::Colorize;
use tstoy_config::ConfigStore;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let store = ConfigStore::new(cli.scope_paths());
    let mut out = io::stdout().lock();

    match &cli.command {
        Commands::Get { all } => {
            let input = input::load(cli.input.as_deref())?;
            commands::run_get(&store, *all, &cli.settings, input, &mut out)?;
        }
        Commands::Set => {
            let input = input::load(cli.input.as_deref())?;
            // Flush the observed state before the error is reported.
            let result = commands::run_set(&store, &cli.settings, input, &mut out);
            out.flush()?;
            result?;
        }
        Commands::Test => {
            let input = input::load(cli.input.as_deref())?;
            commands::run_test(&store, &cli.settings, input, &mut out)?;
        }
        Commands::Schema => commands::run_schema(&mut out)?,
        Commands::ShowPath { scopes } => commands::run_show_path(&store, scopes, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
