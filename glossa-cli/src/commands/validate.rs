//! Validate command implementation

use anyhow::Result;
use clap::Args;
use glossa_engine::ExtractorConfig;
use std::path::PathBuf;

use crate::error::CliError;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let checked =
            ExtractorConfig::from_file(&self.config).and_then(|config| {
                config.validate()?;
                Ok(config)
            });

        match checked {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                println!("  Parser: {}", describe_parser(&config));
                println!("  Execution: {:?}", config.execution.mode);
                println!("  Filter tolerance: {}", config.filter.tolerance);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(CliError::ConfigError(format!("validation failed: {e}")).into())
            }
        }
    }
}

fn describe_parser(config: &ExtractorConfig) -> String {
    if config.parser.command.is_empty() {
        "(none; pass --parser-cmd when extracting)".to_string()
    } else {
        config.parser.command.join(" ")
    }
}
