//! Extract command implementation

use anyhow::{Context, Result};
use clap::Args;
use glossa_engine::{DefinitionExtractor, Input};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::{load_config, ConfigOverrides};
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{create_formatter, OutputFormat};
use crate::progress::ProgressReporter;

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Configuration file (default: built-in configuration)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Constituency parser command line, overriding `[parser] command`
    #[arg(long, value_name = "CMD", env = "GLOSSA_PARSER_CMD")]
    pub parser_cmd: Option<String>,

    /// Resolve definitions on N worker threads
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Resolve definitions on the calling thread only
    #[arg(long, conflicts_with = "threads")]
    pub sequential: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting glossary extraction");
        log::debug!("Arguments: {:?}", self);

        let mut config = load_config(self.config.as_deref())?;
        self.overrides().apply(&mut config);
        if config.parser.command.is_empty() {
            return Err(CliError::ConfigError(
                "no parser command; pass --parser-cmd or set [parser] command".to_string(),
            )
            .into());
        }

        let extractor =
            DefinitionExtractor::with_config(config).context("Failed to set up the extractor")?;

        let files = resolve_patterns(&self.input)?;
        let keyed = files.len() > 1;
        log::info!("Resolved {} input file(s)", files.len());

        let mut formatter = create_formatter(self.format, self.open_output()?);
        let mut progress = ProgressReporter::new(self.quiet);
        if keyed {
            progress.init_files(files.len() as u64);
        }

        for path in &files {
            let source = path.display().to_string();
            let bytes = FileReader::read_bytes(path)?;
            let glossary = extractor.extract(Input::from_bytes(bytes));
            log::info!("{source}: {} definition(s)", glossary.entries().len());

            formatter.format_glossary(keyed.then_some(source.as_str()), &glossary)?;
            progress.file_completed(&source);
        }

        progress.finish();
        formatter.finish()
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            parser_command: self.parser_cmd.clone(),
            threads: self.threads,
            sequential: self.sequential,
        }
    }

    fn open_output(&self) -> Result<Box<dyn Write + Send + Sync>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout())),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when commands run in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(input: &str) -> ExtractArgs {
        ExtractArgs {
            input: vec![input.to_string()],
            output: None,
            format: OutputFormat::Json,
            config: None,
            parser_cmd: None,
            threads: None,
            sequential: false,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_overrides_follow_flags() {
        let mut extract = args("contract.txt");
        extract.parser_cmd = Some("parse --tree".to_string());
        extract.threads = Some(3);

        let overrides = extract.overrides();
        assert_eq!(overrides.parser_command.as_deref(), Some("parse --tree"));
        assert_eq!(overrides.threads, Some(3));
        assert!(!overrides.sequential);
    }

    #[test]
    fn test_missing_parser_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contract.txt");
        std::fs::write(&path, "The Company shall pay.").unwrap();

        let err = args(path.to_str().unwrap()).execute().unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert!(err.to_string().contains("parser"));
    }

    #[cfg(unix)]
    #[test]
    fn test_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("contract.txt");
        let output = temp_dir.path().join("glossary.json");
        std::fs::write(&input, "The Company shall pay.").unwrap();

        let mut extract = args(input.to_str().unwrap());
        extract.output = Some(output.clone());
        // Parser that consumes the sentence and prints nothing
        extract.parser_cmd = Some("cat".to_string());
        extract.execute().unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.trim(), "{}");
    }
}
