mod catalog;
mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use tracing::{debug, error};

use crate::cli::{Cli, Commands};
use crate::error::Result;

fn main() {
    if let Err(e) = run_app() {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet)?;
    debug!("Full CLI arguments parsed: {:?}", &cli);

    match cli.command {
        Commands::Solve(args) => commands::solve::run(args),
        Commands::Check(args) => commands::check::run(args),
    }
}
