//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use cudos_token::Address;

/// CUDOS token ledger tool.
#[derive(Parser, Debug, Clone)]
#[command(name = "cudos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, env = "CUDOS_FORMAT", default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show token metadata and supply.
    Info,

    /// Replay a scenario file against a freshly deployed ledger.
    Replay(ReplayArgs),
}

/// Arguments for the replay command.
#[derive(Parser, Debug, Clone)]
pub struct ReplayArgs {
    /// Path to the scenario JSON file.
    #[arg(required = true)]
    pub scenario: PathBuf,

    /// Deploy from this account instead of the scenario's genesis.
    #[arg(short, long, env = "CUDOS_GENESIS")]
    pub genesis: Option<Address>,

    /// Continue past rejected steps instead of stopping at the first one.
    #[arg(short, long)]
    pub keep_going: bool,
}
