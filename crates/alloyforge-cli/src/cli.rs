use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(
    name = "alloyforge",
    version,
    about = "AlloyForge - find the alloy composition with the highest creep resistance under a cost ceiling"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a catalog for the optimal alloy.
    Solve(SolveArgs),
    /// Validate a catalog without solving it.
    Check(CheckArgs),
}

/// Arguments for the `solve` subcommand.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Element catalog in TOML or YAML format.
    #[arg(short, long, value_name = "PATH")]
    pub catalog: PathBuf,

    /// Name of the base (filler) element.
    #[arg(short, long, value_name = "NAME")]
    pub base: String,

    /// Cost ceiling per unit of alloy.
    #[arg(short, long, value_name = "DECIMAL")]
    pub max_cost: Decimal,

    /// Optimizer configuration in TOML or YAML format.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Element catalog in TOML or YAML format.
    #[arg(short, long, value_name = "PATH")]
    pub catalog: PathBuf,

    /// Name of the base (filler) element.
    #[arg(short, long, value_name = "NAME")]
    pub base: String,
}
