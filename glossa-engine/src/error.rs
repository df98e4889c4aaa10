//! Layered error types
//!
//! Structural misses during pattern matching are not errors; they surface as
//! `None` from the solvers. The types here cover real failures only.

use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// The source encoding of a byte payload could not be inferred
    #[error("encoding detection failed: {reason}")]
    EncodingDetection {
        /// Why no encoding could be inferred
        reason: String,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Constituency parser failure
    #[error("parse failure: {0}")]
    Parse(#[from] ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Thread pool construction failed
    #[cfg(feature = "parallel")]
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

/// Failures raised by a [`ConstituencyParser`](crate::parser::ConstituencyParser)
#[derive(Error, Debug)]
pub enum ParseError {
    /// The parser produced output that is not a valid bracketed tree
    #[error("malformed tree: {0}")]
    MalformedTree(#[from] TreeError),

    /// The external parser process could not be run
    #[error("failed to run parser command `{command}`: {reason}")]
    Command {
        /// The program that was launched
        command: String,
        /// The underlying failure
        reason: String,
    },

    /// The external parser exited unsuccessfully
    #[error("parser exited with status {status}: {stderr}")]
    Exit {
        /// Exit status as reported by the OS
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// The parser has no tree for this sentence
    #[error("no parse available for sentence: {0}")]
    Unavailable(String),
}

/// Errors from reading Penn-Treebank bracketed trees
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Input contained no tree at all
    #[error("empty tree")]
    Empty,

    /// A `(` was never closed
    #[error("unbalanced brackets: missing `)`")]
    Unclosed,

    /// A `)` appeared with no matching `(`
    #[error("unexpected `)` at byte {position}")]
    UnexpectedClose {
        /// Byte position of the stray bracket
        position: usize,
    },

    /// Text followed the outermost tree
    #[error("trailing input at byte {position}")]
    TrailingInput {
        /// Byte position where the trailing input starts
        position: usize,
    },

    /// A token appeared outside of any bracket
    #[error("stray token at byte {position}")]
    StrayToken {
        /// Byte position of the token
        position: usize,
    },

    /// A node had neither children nor a token
    #[error("node `{label}` has no children")]
    EmptyNode {
        /// Label of the offending node
        label: String,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML could not be deserialized
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("{field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
