//! Term candidate extraction and word counting
//!
//! A term candidate is a capitalized word, or a run of words each starting
//! with a digit or capital, such as `Effective Date` or `Schedule 2`. Every
//! occurrence offset is recorded so the filter and resolver can revisit them.

use crate::stopwords::StopwordList;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn term_regex() -> &'static Regex {
    static TERM: OnceLock<Regex> = OnceLock::new();
    TERM.get_or_init(|| {
        Regex::new(r"[a-z0-9]*[A-Z][\w\-/]*(?:\s+[0-9A-Z][\w\-/]*)*").expect("valid term regex")
    })
}

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[\w\-/]+").expect("valid word regex"))
}

/// Term string to ascending byte offsets of its occurrences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermOccurrenceIndex {
    terms: HashMap<String, Vec<usize>>,
}

impl TermOccurrenceIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence; offsets must be pushed in ascending order
    pub fn record(&mut self, term: &str, offset: usize) {
        match self.terms.get_mut(term) {
            Some(offsets) => offsets.push(offset),
            None => {
                self.terms.insert(term.to_string(), vec![offset]);
            }
        }
    }

    /// Occurrence offsets of a term
    pub fn get(&self, term: &str) -> Option<&[usize]> {
        self.terms.get(term).map(Vec::as_slice)
    }

    /// Whether the term is present
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Remove a term, returning its offsets
    pub fn remove(&mut self, term: &str) -> Option<Vec<usize>> {
        self.terms.remove(term)
    }

    /// Term strings in arbitrary order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether there are no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms with their offsets, ordered by first occurrence
    pub fn by_first_occurrence(&self) -> Vec<(&str, &[usize])> {
        let mut entries: Vec<(&str, &[usize])> = self
            .terms
            .iter()
            .map(|(term, offsets)| (term.as_str(), offsets.as_slice()))
            .collect();
        entries.sort_by(|a, b| {
            let first = |offsets: &[usize]| offsets.first().copied().unwrap_or(usize::MAX);
            first(a.1).cmp(&first(b.1)).then_with(|| a.0.cmp(b.0))
        });
        entries
    }
}

impl FromIterator<(String, Vec<usize>)> for TermOccurrenceIndex {
    fn from_iter<I: IntoIterator<Item = (String, Vec<usize>)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

/// Case-sensitive token counts of a whole document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordOccurrenceIndex {
    counts: HashMap<String, usize>,
}

impl WordOccurrenceIndex {
    /// Count every word token of `text`
    pub fn build(text: &str) -> Self {
        let mut counts = HashMap::new();
        for m in word_regex().find_iter(text) {
            *counts.entry(m.as_str().to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Build from explicit counts
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self {
            counts: counts.into_iter().map(|(w, n)| (w.into(), n)).collect(),
        }
    }

    /// Occurrences of an exact token
    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no tokens were counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Finds capitalized term candidates in normalized text
#[derive(Debug, Clone, Copy, Default)]
pub struct TermCandidateExtractor;

impl TermCandidateExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Collect every candidate and its offsets, skipping single-word stopwords
    pub fn extract(&self, text: &str, stopwords: &StopwordList) -> TermOccurrenceIndex {
        let mut index = TermOccurrenceIndex::new();

        for m in term_regex().find_iter(text) {
            let term = m.as_str();
            let single_word = !term.contains(char::is_whitespace);
            if single_word && stopwords.contains(term) {
                continue;
            }
            index.record(term, m.start());
        }

        log::debug!("extracted {} term candidates", index.len());
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> TermOccurrenceIndex {
        TermCandidateExtractor::new().extract(text, &StopwordList::new("en"))
    }

    #[test]
    fn test_single_and_multi_word_terms() {
        let text = "The Effective Date is set by the Buyer. The Buyer pays.";
        let index = extract(text);

        assert_eq!(index.get("Buyer"), Some(&[33][..]));
        assert_eq!(index.get("The Buyer"), Some(&[40][..]));
        assert_eq!(index.get("The Effective Date"), Some(&[0][..]));
        assert!(!index.contains("The"));
    }

    #[test]
    fn test_stopwords_only_filter_single_words() {
        let text = "This Agreement binds. This binds.";
        let index = extract(text);
        assert!(index.contains("This Agreement"));
        assert!(!index.contains("This"));
    }

    #[test]
    fn test_mixed_case_prefix_and_digits() {
        let index = extract("Deliver per Schedule 2 via eBay and iPhone-2/B.");
        assert_eq!(index.get("Schedule 2"), Some(&[12][..]));
        assert!(index.contains("eBay"));
        assert!(index.contains("iPhone-2/B"));
        assert!(!index.contains("Deliver per"));
    }

    #[test]
    fn test_term_after_underscore() {
        let index = extract("See x_Buyer and Seller_Terms.");
        assert_eq!(index.get("Buyer"), Some(&[6][..]));
        assert_eq!(index.get("Seller_Terms"), Some(&[16][..]));
    }

    #[test]
    fn test_offsets_ascend() {
        let text = "Seller ships. Then Seller invoices. Seller is paid.";
        let index = TermCandidateExtractor::new().extract(text, &StopwordList::default());
        assert_eq!(index.get("Seller"), Some(&[0, 36][..]));
        assert_eq!(index.get("Then Seller"), Some(&[14][..]));
    }

    #[test]
    fn test_by_first_occurrence() {
        let index: TermOccurrenceIndex = [
            ("Gamma".to_string(), vec![30, 90]),
            ("Alpha".to_string(), vec![5]),
            ("Beta".to_string(), vec![12, 13]),
        ]
        .into_iter()
        .collect();

        let order: Vec<&str> = index.by_first_occurrence().iter().map(|(t, _)| *t).collect();
        assert_eq!(order, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_word_counts_are_case_sensitive() {
        let words = WordOccurrenceIndex::build("Party party PARTY party-wall and/or");
        assert_eq!(words.count("Party"), 1);
        assert_eq!(words.count("party"), 1);
        assert_eq!(words.count("PARTY"), 1);
        assert_eq!(words.count("party-wall"), 1);
        assert_eq!(words.count("and/or"), 1);
        assert_eq!(words.count("missing"), 0);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract("").is_empty());
        assert!(WordOccurrenceIndex::build("").is_empty());
    }
}
