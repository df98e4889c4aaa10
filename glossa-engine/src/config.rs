//! Extractor configuration
//!
//! Every tunable of the pipeline lives here. The values shipped in
//! `configs/default.toml` are the reference policy constants; the TOML file
//! and the `Default` impls are kept identical (see the tests below).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The embedded default configuration, as written by `glossa generate-config`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../configs/default.toml");

/// Default configuration constants
pub mod defaults {
    /// Fragments shorter than this are merged into the previous sentence
    pub const MIN_FRAGMENT_CHARS: usize = 5;

    /// Weight of the "not incidental capitalization" probability
    pub const CAPITALIZATION_WEIGHT: f64 = 0.165;

    /// Weight of the "not merely sentence-initial" probability (subtracted)
    pub const SENTENCE_START_WEIGHT: f64 = 0.035;

    /// Weight of the distributional relevance probability
    pub const DISTRIBUTION_WEIGHT: f64 = 0.800;

    /// Scores strictly below this remove the term
    pub const TOLERANCE: f64 = 0.130;

    /// Upper/(upper+lower) letter ratio above which a sentence is a heading
    pub const ALL_CAPS_RATIO: f64 = 0.66;

    /// Longer sentences are never parsed
    pub const MAX_SENTENCE_WORDS: usize = 150;

    /// Phrases that introduce a "X means Y" definition
    pub const CUE_PHRASES: &[&str] = &["means", "shall mean", "refers", "shall refer"];

    /// Language of the sentence boundary rules
    pub const SEGMENTATION_LANGUAGE: &str = "en";

    /// Language codes the sentence boundary detector has rules for
    pub const SEGMENTATION_LANGUAGES: &[&str] = &["en", "eng", "english", "ja", "jpn", "japanese"];
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Sentence segmentation
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Statistical term filter
    #[serde(default)]
    pub filter: FilterConfig,

    /// Definition resolution
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Parse-tree pattern matching
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Stopword list
    #[serde(default)]
    pub stopwords: StopwordConfig,

    /// External constituency parser
    #[serde(default)]
    pub parser: ParserConfig,

    /// Execution strategy
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Sentence segmentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Fragments shorter than this many characters are merged backwards
    pub min_fragment_chars: usize,
    /// Language of the sentence boundary rules (`en` or `ja`)
    pub language: String,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_fragment_chars: defaults::MIN_FRAGMENT_CHARS,
            language: defaults::SEGMENTATION_LANGUAGE.to_string(),
        }
    }
}

/// Weights of the term filter's probability model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Weight for p1 (capitalized form is not incidental)
    pub capitalization_weight: f64,
    /// Weight for p2 (term is not merely sentence-initial), subtracted
    pub sentence_start_weight: f64,
    /// Weight for p3 (distributional relevance)
    pub distribution_weight: f64,
    /// Terms scoring strictly below this are removed
    pub tolerance: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            capitalization_weight: defaults::CAPITALIZATION_WEIGHT,
            sentence_start_weight: defaults::SENTENCE_START_WEIGHT,
            distribution_weight: defaults::DISTRIBUTION_WEIGHT,
            tolerance: defaults::TOLERANCE,
        }
    }
}

/// Definition resolver settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Uppercase letter ratio above which a sentence is skipped as a heading
    pub all_caps_ratio: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            all_caps_ratio: defaults::ALL_CAPS_RATIO,
        }
    }
}

/// Pattern matcher settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Sentences with more whitespace-separated words are rejected unparsed
    pub max_sentence_words: usize,
    /// Substrings that trigger the "X means Y" construction
    pub cue_phrases: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_sentence_words: defaults::MAX_SENTENCE_WORDS,
            cue_phrases: defaults::CUE_PHRASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Stopword list settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwordConfig {
    /// Language code of the built-in list
    pub language: String,
    /// Additional stopwords
    #[serde(default)]
    pub extra: Vec<String>,
}

impl Default for StopwordConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            extra: Vec::new(),
        }
    }
}

/// External parser settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Program and arguments; empty when no external parser is configured
    pub command: Vec<String>,
}

/// How terms are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One term after another, in first-occurrence order
    #[default]
    Sequential,
    /// Terms resolved concurrently on a thread pool
    Parallel,
}

/// Execution settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Sequential or parallel resolution
    pub mode: ExecutionMode,
    /// Worker threads for parallel mode (None = one per logical CPU)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

impl ExtractorConfig {
    /// Parse a configuration from TOML and validate it
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self, crate::error::EngineError> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&source)?)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !crate::tokenize::is_supported_language(&self.segmentation.language) {
            return Err(ConfigError::Invalid {
                field: "segmentation.language",
                reason: format!("unsupported language {:?}", self.segmentation.language),
            });
        }

        let weights = [
            ("filter.capitalization_weight", self.filter.capitalization_weight),
            ("filter.sentence_start_weight", self.filter.sentence_start_weight),
            ("filter.distribution_weight", self.filter.distribution_weight),
        ];
        for (field, value) in weights {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a finite number, got {value}"),
                });
            }
        }

        if !(0.0..=1.0).contains(&self.filter.tolerance) {
            return Err(ConfigError::Invalid {
                field: "filter.tolerance",
                reason: format!("must be within [0, 1], got {}", self.filter.tolerance),
            });
        }

        let ratio = self.resolver.all_caps_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "resolver.all_caps_ratio",
                reason: format!("must be within (0, 1], got {ratio}"),
            });
        }

        if self.matcher.max_sentence_words == 0 {
            return Err(ConfigError::Invalid {
                field: "matcher.max_sentence_words",
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.matcher.cue_phrases.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "matcher.cue_phrases",
                reason: "at least one non-empty cue phrase is required".to_string(),
            });
        }

        if self.execution.threads == Some(0) {
            return Err(ConfigError::Invalid {
                field: "execution.threads",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
