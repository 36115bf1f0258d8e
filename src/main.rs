mod cli;
mod config;
mod console;
mod execution;
mod manifest;
mod package_managers;
mod themes;
mod tui;
mod types;
mod workflow;

use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout belongs to the picker and the script output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = cli.execute();
    std::process::exit(exit_code);
}
