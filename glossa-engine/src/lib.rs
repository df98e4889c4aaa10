//! Automatic glossary extraction for contract text
//!
//! The engine finds capitalized defined terms in a document, filters out
//! incidental capitals with a small probability model, and recovers each
//! term's definition from the constituency parse of a sentence that defines
//! it, either `"Term" means ...` or `Definition (the "Term")`.
//!
//! ```no_run
//! use glossa_engine::{DefinitionExtractor, ExtractorConfig, Input};
//!
//! let mut config = ExtractorConfig::default();
//! config.parser.command = vec!["./parse-sentence".to_string()];
//!
//! let extractor = DefinitionExtractor::with_config(config)?;
//! let glossary = extractor.extract(Input::from_file("contract.txt"));
//! println!("{}", serde_json::to_string_pretty(&glossary)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod assembler;
pub mod candidates;
pub mod config;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod input;
pub mod matcher;
pub mod normalizer;
pub mod parser;
pub mod resolver;
pub mod segmenter;
pub mod stopwords;
pub mod tokenize;
pub mod tree;

#[cfg(test)]
mod test_support;

// Re-export key types
pub use assembler::{DefinitionRecord, Glossary, ResultAssembler};
pub use candidates::{TermCandidateExtractor, TermOccurrenceIndex, WordOccurrenceIndex};
pub use config::{ExecutionMode, ExtractorConfig, DEFAULT_CONFIG_TOML};
pub use error::{ConfigError, EngineError, ParseError, Result, TreeError};
pub use extractor::{DefinitionExtractor, DefinitionExtractorBuilder};
pub use filter::TermFilter;
pub use input::Input;
pub use matcher::{solve_met1, solve_met2, PatternMatcher};
pub use normalizer::{detect_encoding, TextNormalizer};
pub use parser::{CommandParser, ConstituencyParser};
pub use resolver::DefinitionResolver;
pub use segmenter::{Sentence, SentenceList, SentenceSegmenter};
pub use stopwords::StopwordList;
pub use tokenize::{
    is_supported_language, PennTokenizer, SakursSentenceSplitter, SentenceSplitter, WordTokenizer,
};
pub use tree::{NodeId, ParseTree};
