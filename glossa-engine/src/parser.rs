//! Constituency parser seam
//!
//! The pipeline never parses on its own; it asks a [`ConstituencyParser`]
//! for the tree of one sentence at a time. [`CommandParser`] drives any
//! external program that reads a sentence on stdin and prints a Penn-Treebank
//! bracketed tree on stdout.

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::tree::ParseTree;
use std::io::Write;
use std::process::{Command, Stdio};

/// Produces a constituency tree for a single sentence
pub trait ConstituencyParser: Send + Sync {
    /// Parse `sentence`
    fn parse(&self, sentence: &str) -> Result<ParseTree, ParseError>;
}

impl<P: ConstituencyParser + ?Sized> ConstituencyParser for Box<P> {
    fn parse(&self, sentence: &str) -> Result<ParseTree, ParseError> {
        (**self).parse(sentence)
    }
}

impl<P: ConstituencyParser + ?Sized> ConstituencyParser for std::sync::Arc<P> {
    fn parse(&self, sentence: &str) -> Result<ParseTree, ParseError> {
        (**self).parse(sentence)
    }
}

/// Parser backed by an external command, spawned once per sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParser {
    program: String,
    args: Vec<String>,
}

impl CommandParser {
    /// Create a parser running `program` with `args`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from configuration; `None` when no command is configured
    pub fn from_config(config: &ParserConfig) -> Option<Self> {
        let (program, args) = config.command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    /// Program name
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn run(&self, sentence: &str) -> Result<String, ParseError> {
        let command_error = |reason: String| ParseError::Command {
            command: self.command_line(),
            reason,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| command_error(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(sentence.as_bytes())
                .and_then(|_| stdin.write_all(b"\n"))
                .map_err(|e| command_error(format!("writing sentence: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| command_error(format!("waiting for output: {e}")))?;

        if !output.status.success() {
            return Err(ParseError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ConstituencyParser for CommandParser {
    fn parse(&self, sentence: &str) -> Result<ParseTree, ParseError> {
        let stdout = self.run(sentence)?;
        Ok(ParseTree::from_bracketed(stdout.trim())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        assert_eq!(CommandParser::from_config(&ParserConfig::default()), None);

        let config = ParserConfig {
            command: vec!["java".to_string(), "-jar".to_string(), "parser.jar".to_string()],
        };
        let parser = CommandParser::from_config(&config).unwrap();
        assert_eq!(parser.program(), "java");
        assert_eq!(parser.command_line(), "java -jar parser.jar");
    }

    #[test]
    fn test_missing_program_is_command_error() {
        let parser = CommandParser::new("glossa-no-such-parser-binary", Vec::new());
        let err = parser.parse("The Buyer pays.").unwrap_err();
        assert!(matches!(err, ParseError::Command { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_command_and_reads_tree() {
        let parser = CommandParser::new(
            "sh",
            vec![
                "-c".to_string(),
                "cat > /dev/null; echo '(ROOT (S (NP (NNP Acme)) (VP (VBZ sells))))'".to_string(),
            ],
        );
        let tree = parser.parse("Acme sells.").unwrap();
        assert_eq!(tree.leaf_tokens(tree.root()), vec!["Acme", "sells"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_reported() {
        let parser = CommandParser::new(
            "sh",
            vec!["-c".to_string(), "cat > /dev/null; echo boom >&2; exit 3".to_string()],
        );
        match parser.parse("Acme sells.").unwrap_err() {
            ParseError::Exit { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_garbage_output_is_malformed_tree() {
        let parser = CommandParser::new(
            "sh",
            vec!["-c".to_string(), "cat > /dev/null; echo '(S (NP'".to_string()],
        );
        let err = parser.parse("Acme sells.").unwrap_err();
        assert!(matches!(err, ParseError::MalformedTree(_)));
    }
}
