// src/bin/gm.rs

//! The `gm` executable: runs the build tool the current project uses.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use gum::{
    cli::{Cli, dispatcher::Dispatcher},
    system::probe::OsProbe,
};

fn main() {
    env_logger::init();

    match run_cli(Cli::parse()) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("\n{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Probes the real environment and hands the raw arguments to the dispatcher.
fn run_cli(cli: Cli) -> Result<i32> {
    log::debug!("CLI args parsed: {:?}", cli);

    let probe = OsProbe::from_env().context("Could not inspect the current environment")?;
    Dispatcher::new(&probe).run(&cli.args)
}
