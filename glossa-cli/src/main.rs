//! `glossa` command line entry point

use clap::Parser;
use glossa_cli::commands::Commands;

/// Extract defined terms and their definitions from contract text
#[derive(Debug, Parser)]
#[command(name = "glossa", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}
