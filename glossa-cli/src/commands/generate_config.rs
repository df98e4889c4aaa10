//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use glossa_engine::DEFAULT_CONFIG_TOML;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        fs::write(&self.output, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration written to {}", self.output.display());
        println!();
        println!("Next steps:");
        println!("1. Set [parser] command to your constituency parser");
        println!("2. Validate your configuration:");
        println!("   glossa validate -c {}", self.output.display());
        println!("3. Use it for extraction:");
        println!("   glossa extract -i contract.txt -c {}", self.output.display());

        Ok(())
    }
}
