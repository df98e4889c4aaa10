//! Configuration loading and command-line overrides

use anyhow::{Context, Result};
use glossa_engine::{ExecutionMode, ExtractorConfig};
use std::path::Path;

/// Load the extractor configuration, falling back to the built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<ExtractorConfig> {
    match path {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            ExtractorConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display()))
        }
        None => Ok(ExtractorConfig::default()),
    }
}

/// Settings given on the command line that take precedence over the file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Parser command line, split on whitespace
    pub parser_command: Option<String>,
    /// Worker threads; implies parallel resolution
    pub threads: Option<usize>,
    /// Force sequential resolution
    pub sequential: bool,
}

impl ConfigOverrides {
    /// Apply the overrides in place
    pub fn apply(&self, config: &mut ExtractorConfig) {
        if let Some(command) = &self.parser_command {
            config.parser.command = command.split_whitespace().map(str::to_string).collect();
        }
        if let Some(threads) = self.threads {
            config.execution.mode = ExecutionMode::Parallel;
            config.execution.threads = Some(threads);
        }
        if self.sequential {
            config.execution.mode = ExecutionMode::Sequential;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config, ExtractorConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[parser]\ncommand = [\"parse-sentence\", \"--penn\"]\n\n[filter]\ntolerance = 0.2\n"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.parser.command, vec!["parse-sentence", "--penn"]);
        assert_eq!(config.filter.tolerance, 0.2);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = load_config(Some(Path::new("/nonexistent/glossa.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/glossa.toml"));
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = ExtractorConfig::default();
        ConfigOverrides {
            parser_command: Some("java  -jar parser.jar".to_string()),
            threads: Some(4),
            sequential: false,
        }
        .apply(&mut config);

        assert_eq!(config.parser.command, vec!["java", "-jar", "parser.jar"]);
        assert_eq!(config.execution.mode, ExecutionMode::Parallel);
        assert_eq!(config.execution.threads, Some(4));
    }

    #[test]
    fn test_sequential_override_wins() {
        let mut config = ExtractorConfig::default();
        config.execution.mode = ExecutionMode::Parallel;
        ConfigOverrides {
            sequential: true,
            ..Default::default()
        }
        .apply(&mut config);

        assert_eq!(config.execution.mode, ExecutionMode::Sequential);
    }
}
