//! CUDOS CLI binary entrypoint.
//!
//! This is the main entry point for the `cudos` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cudos_cli::cli::{Cli, Commands};
use cudos_cli::commands::{InfoCommand, ReplayCommand};
use cudos_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), cudos_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Info => {
            InfoCommand::new().execute(&mut stdout, &format)?;
        }
        Commands::Replay(args) => {
            ReplayCommand::new(&args).execute(&mut stdout, &format)?;
        }
    }

    Ok(())
}
