//! CLI command implementations

use anyhow::Result;
use clap::{Subcommand, ValueEnum};

use crate::output::OutputFormat;

pub mod extract;
pub mod generate_config;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract the glossary of one or more documents
    Extract(extract::ExtractArgs),

    /// Write the default configuration to a file
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check that a configuration file loads and is consistent
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Extract(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::List { subcommand } => {
                print!("{}", subcommand.render());
                Ok(())
            }
        }
    }
}

impl ListCommands {
    /// The listing printed for this subcommand
    pub fn render(&self) -> String {
        match self {
            ListCommands::Formats => {
                let mut listing = String::from("Available output formats:\n");
                for format in OutputFormat::value_variants() {
                    if let Some(value) = format.to_possible_value() {
                        let help = value.get_help().map(|h| h.to_string()).unwrap_or_default();
                        listing.push_str(&format!("  {:<10} {}\n", value.get_name(), help));
                    }
                }
                listing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_formats_names_every_format() {
        let listing = ListCommands::Formats.render();
        assert!(listing.starts_with("Available output formats:"));
        for name in ["json", "text", "markdown"] {
            assert!(listing.contains(name), "missing {name} in {listing}");
        }
    }

    #[test]
    fn test_commands_debug_format() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Formats,
        };

        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Formats"));
    }
}
