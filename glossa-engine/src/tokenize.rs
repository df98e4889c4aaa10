//! Sentence splitting and word tokenization
//!
//! Both are collaborators of the pipeline and sit behind traits so a caller
//! can plug in the tokenizer that matches its parser. Sentence boundaries come
//! from `sakurs-core`; words follow the Unicode word-boundary rules.

use crate::config::defaults::SEGMENTATION_LANGUAGES;
use crate::error::ConfigError;
use log::warn;
use sakurs_core::{Input, SentenceProcessor};
use unicode_segmentation::UnicodeSegmentation;

/// Splits text into sentence strings, in document order
pub trait SentenceSplitter: Send + Sync {
    /// Split `text` into raw sentences
    fn split(&self, text: &str) -> Vec<String>;
}

/// Splits text into word tokens
pub trait WordTokenizer: Send + Sync {
    /// Tokenize `text`
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Whether a token is any flavor of double quote
pub fn is_quote_token(token: &str) -> bool {
    matches!(token, "\"" | "``" | "''" | "\u{201C}" | "\u{201D}")
}

/// Sentence splitter backed by the `sakurs-core` boundary detector
///
/// Each boundary offset closes a sentence; the text between two boundaries is
/// trimmed and kept when non-empty.
pub struct SakursSentenceSplitter {
    processor: SentenceProcessor,
}

impl Default for SakursSentenceSplitter {
    fn default() -> Self {
        Self {
            processor: SentenceProcessor::new(),
        }
    }
}

impl SakursSentenceSplitter {
    /// Create a splitter for a language code (`en`, `ja`)
    pub fn new(language: &str) -> Result<Self, ConfigError> {
        if !is_supported_language(language) {
            return Err(ConfigError::Invalid {
                field: "segmentation.language",
                reason: format!("unsupported language {language:?}"),
            });
        }
        SentenceProcessor::with_language(language)
            .map(|processor| Self { processor })
            .map_err(|e| ConfigError::Invalid {
                field: "segmentation.language",
                reason: e.to_string(),
            })
    }
}

impl SentenceSplitter for SakursSentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let output = match self.processor.process(Input::from_text(text)) {
            Ok(output) => output,
            Err(e) => {
                warn!("sentence boundary detection failed, keeping text whole: {e}");
                return vec![text.trim().to_string()];
            }
        };

        let mut sentences = Vec::new();
        let mut start = 0;
        for boundary in &output.boundaries {
            if boundary.offset <= start {
                continue;
            }
            let Some(piece) = text.get(start..boundary.offset) else {
                continue;
            };
            push_trimmed(&mut sentences, piece);
            start = boundary.offset;
        }
        if let Some(tail) = text.get(start..) {
            push_trimmed(&mut sentences, tail);
        }

        sentences
    }
}

/// Whether the boundary detector has rules for a language code
pub fn is_supported_language(code: &str) -> bool {
    SEGMENTATION_LANGUAGES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(code))
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

/// Penn-Treebank-like word tokenizer over Unicode word boundaries
///
/// Punctuation is its own token, except that hyphenated or slashed compounds
/// stay whole, a period sticks to the word before it unless it ends the text,
/// doubled `` ` `` and `'` become one quote token, and possessive `'s` is
/// split off.
#[derive(Debug, Clone, Copy, Default)]
pub struct PennTokenizer;

impl PennTokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

fn push_word(tokens: &mut Vec<String>, word: &str) {
    match word
        .strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
    {
        Some(stem) if !stem.is_empty() => {
            tokens.push(stem.to_string());
            tokens.push(word[stem.len()..].to_string());
        }
        _ => tokens.push(word.to_string()),
    }
}

impl WordTokenizer for PennTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let segments: Vec<&str> = text.split_word_bounds().collect();
        let mut tokens: Vec<String> = Vec::new();
        // previous segment was not whitespace
        let mut glued = false;
        let mut join_next = false;

        for (i, segment) in segments.iter().copied().enumerate() {
            if segment.chars().all(char::is_whitespace) {
                glued = false;
                join_next = false;
                continue;
            }

            let after_word = glued && tokens.last().is_some_and(|t| is_word(t));
            match tokens.last_mut() {
                Some(last) if join_next => {
                    last.push_str(segment);
                    join_next = false;
                }
                Some(last)
                    if (segment == "-" || segment == "/")
                        && after_word
                        && segments.get(i + 1).is_some_and(|s| is_word(s)) =>
                {
                    last.push_str(segment);
                    join_next = true;
                }
                Some(last)
                    if segment == "."
                        && after_word
                        && segments[i + 1..].iter().any(|s| is_word(s)) =>
                {
                    last.push('.');
                }
                Some(last)
                    if glued && (segment == "`" || segment == "'") && last.as_str() == segment =>
                {
                    last.push_str(segment);
                }
                _ if is_word(segment) => push_word(&mut tokens, segment),
                _ => tokens.push(segment.to_string()),
            }
            glued = true;
        }

        tokens
    }
}
