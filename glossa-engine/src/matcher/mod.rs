//! Definition pattern matching
//!
//! A candidate occurrence is classified by the construction around it, and
//! the sentence (or the part of it starting at the term) is parsed only when
//! one of the known constructions applies:
//!
//! - bracketed: `Beagle Inc. (the "Company")`, solved by [`solve_met2`]
//! - quoted: `"Company" means Beagle Inc.`, solved by [`solve_met1`]
//! - cue phrase without quotes: `The Company means Beagle Inc.`, re-quoted
//!   around the occurrence and then solved like the quoted case

mod means;
mod parenthetical;

pub use means::solve_met1;
pub use parenthetical::solve_met2;

use crate::config::MatcherConfig;
use crate::error::ParseError;
use crate::parser::ConstituencyParser;
use crate::tokenize::{is_quote_token, WordTokenizer};
use std::borrow::Cow;

/// How a definition is expected to be phrased around a term occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construction<'s> {
    /// The term sits inside a parenthetical that follows its definition
    Parenthetical,
    /// The term opens a `"X" means Y` clause; `sentence` has the term quoted
    Means {
        /// Sentence with the occurrence wrapped in quotes
        sentence: Cow<'s, str>,
    },
}

/// Parse-based definition extraction for one term occurrence
pub struct PatternMatcher<'a> {
    parser: &'a dyn ConstituencyParser,
    tokenizer: &'a dyn WordTokenizer,
    config: &'a MatcherConfig,
}

impl<'a> PatternMatcher<'a> {
    /// Create a matcher
    pub fn new(
        parser: &'a dyn ConstituencyParser,
        tokenizer: &'a dyn WordTokenizer,
        config: &'a MatcherConfig,
    ) -> Self {
        Self {
            parser,
            tokenizer,
            config,
        }
    }

    /// Extract the definition of `term` at byte `offset` within `sentence`
    ///
    /// `Ok(None)` covers every expected miss: oversized sentences, no known
    /// construction, and trees without the expected shape. Parser failures
    /// are returned as errors for the caller to log.
    pub fn extract_definition(
        &self,
        term: &str,
        sentence: &str,
        offset: usize,
    ) -> Result<Option<String>, ParseError> {
        let words = sentence.split_whitespace().count();
        if words > self.config.max_sentence_words {
            log::trace!("skipping sentence of {words} words");
            return Ok(None);
        }

        let term_index = occurrence_ordinal(sentence, term, offset);
        if term_index == 0 {
            return Ok(None);
        }

        let term_tokens = self.tokenizer.tokenize(term);
        if term_tokens.is_empty() {
            return Ok(None);
        }
        let term_tokens: Vec<&str> = term_tokens.iter().map(String::as_str).collect();

        let Some(construction) = self.detect(term, &term_tokens, sentence, term_index) else {
            return Ok(None);
        };
        log::trace!("{term:?} #{term_index}: {construction:?}");

        match construction {
            Construction::Parenthetical => {
                let tree = self.parser.parse(&prepare_for_parse(sentence))?;
                if tree.leaf_count() < term_tokens.len() {
                    return Ok(None);
                }
                Ok(solve_met2(&tree, &term_tokens, term_index))
            }
            Construction::Means { sentence } => {
                let Some(start) = nth_match(&sentence, term, term_index) else {
                    return Ok(None);
                };
                let clause = &sentence[previous_char_boundary(&sentence, start)..];
                let tree = self.parser.parse(&prepare_for_parse(clause))?;
                if tree.leaf_count() < term_tokens.len() {
                    return Ok(None);
                }
                Ok(solve_met1(&tree, &term_tokens))
            }
        }
    }

    /// Classify the construction around the `term_index`-th occurrence
    pub fn detect<'s>(
        &self,
        term: &str,
        term_tokens: &[&str],
        sentence: &'s str,
        term_index: usize,
    ) -> Option<Construction<'s>> {
        let start = nth_match(sentence, term, term_index)?;
        let end = start + term.len();

        let before = sentence[..start].rfind(['(', ')']).map(|i| &sentence[i..=i]);
        let after = sentence[end..].find(['(', ')']).map(|i| &sentence[end + i..=end + i]);
        if before == Some("(") && after == Some(")") {
            return Some(Construction::Parenthetical);
        }

        let tokens = self.tokenizer.tokenize(sentence);
        if is_quoted(&tokens, term_tokens, term_index) {
            return Some(Construction::Means {
                sentence: Cow::Borrowed(sentence),
            });
        }

        let has_cue = self
            .config
            .cue_phrases
            .iter()
            .filter(|cue| !cue.trim().is_empty())
            .any(|cue| sentence.contains(cue.as_str()));
        if has_cue {
            let requoted = format!("{}\"{}\"{}", &sentence[..start], term, &sentence[end..]);
            return Some(Construction::Means {
                sentence: Cow::Owned(requoted),
            });
        }

        None
    }
}

/// Number of literal matches of `term` starting at or before `offset`
pub fn occurrence_ordinal(sentence: &str, term: &str, offset: usize) -> usize {
    sentence
        .match_indices(term)
        .take_while(|(start, _)| *start <= offset)
        .count()
}

/// Byte offset of the `nth` (1-based) literal match of `term`
fn nth_match(sentence: &str, term: &str, nth: usize) -> Option<usize> {
    sentence
        .match_indices(term)
        .nth(nth.checked_sub(1)?)
        .map(|(start, _)| start)
}

/// Start of the character before `index` (0 at the beginning)
fn previous_char_boundary(text: &str, index: usize) -> usize {
    text[..index]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

/// Whether the `nth` run of `term_tokens` is directly enclosed in quote tokens
fn is_quoted(tokens: &[String], term_tokens: &[&str], nth: usize) -> bool {
    if term_tokens.is_empty() || tokens.len() < term_tokens.len() || nth == 0 {
        return false;
    }

    let found = (0..=tokens.len() - term_tokens.len())
        .filter(|&i| {
            term_tokens
                .iter()
                .enumerate()
                .all(|(k, t)| tokens[i + k] == *t)
        })
        .nth(nth - 1);

    match found {
        Some(i) if i > 0 => {
            let after = i + term_tokens.len();
            is_quote_token(&tokens[i - 1]) && tokens.get(after).is_some_and(|t| is_quote_token(t))
        }
        _ => false,
    }
}

/// Normalize a sentence before handing it to the parser
///
/// Opening parentheses get a leading space, typographic double quotes become
/// ASCII quotes, and whitespace runs collapse to one space.
pub fn prepare_for_parse(sentence: &str) -> String {
    sentence
        .replace('(', " (")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
