//! Statistical term filter
//!
//! Single-word candidates are scored by a weighted sum of three probabilities
//! and dropped when the score is below tolerance:
//!
//! - `p1`: the capitalized form is not incidental (it rarely appears lowercase)
//! - `p2`: the term does not merely open sentences
//! - `p3`: its occurrence count is distributionally relevant among all terms
//!
//! Multi-word candidates are always kept.

use crate::candidates::{TermOccurrenceIndex, WordOccurrenceIndex};
use crate::config::FilterConfig;
use crate::segmenter::SentenceList;

/// Spread of occurrence-list lengths over every term, computed once per run
#[derive(Debug, Clone, Copy, PartialEq)]
struct OccurrenceStats {
    max: f64,
    min: f64,
    average: f64,
}

impl OccurrenceStats {
    fn collect(terms: &TermOccurrenceIndex) -> Option<Self> {
        let lengths: Vec<usize> = terms
            .keys()
            .filter_map(|term| terms.get(term))
            .map(<[usize]>::len)
            .collect();

        let max = *lengths.iter().max()?;
        let min = *lengths.iter().min()?;
        let average = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;

        Some(Self {
            max: max as f64,
            min: min as f64,
            average,
        })
    }
}

/// Removes incidental single-word candidates from a [`TermOccurrenceIndex`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TermFilter {
    config: FilterConfig,
}

impl TermFilter {
    /// Create a filter with the given weights
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Filter `terms` in place and return the removed terms
    pub fn filter(
        &self,
        terms: &mut TermOccurrenceIndex,
        words: &WordOccurrenceIndex,
        sentences: &SentenceList,
    ) -> Vec<String> {
        let Some(stats) = OccurrenceStats::collect(terms) else {
            return Vec::new();
        };

        let snapshot: Vec<String> = terms
            .keys()
            .filter(|term| !term.contains(char::is_whitespace))
            .map(str::to_string)
            .collect();

        let mut removed = Vec::new();
        for term in snapshot {
            let Some(offsets) = terms.get(&term) else {
                continue;
            };
            let score = self.score(&term, offsets, words, sentences, &stats);
            log::trace!("term {term:?} scored {score:.4}");

            if !self.keeps(score) {
                terms.remove(&term);
                removed.push(term);
            }
        }

        log::debug!(
            "term filter removed {} candidates, {} remain",
            removed.len(),
            terms.len()
        );
        removed
    }

    /// Whether a score survives the tolerance
    pub fn keeps(&self, score: f64) -> bool {
        score >= self.config.tolerance
    }

    fn score(
        &self,
        term: &str,
        offsets: &[usize],
        words: &WordOccurrenceIndex,
        sentences: &SentenceList,
        stats: &OccurrenceStats,
    ) -> f64 {
        let p1 = capitalization_probability(term, words);
        let p2 = sentence_start_probability(offsets, sentences);
        let p3 = distribution_probability(offsets.len(), stats);

        self.config.capitalization_weight * p1 - self.config.sentence_start_weight * p2
            + self.config.distribution_weight * p3
    }
}

fn capitalization_probability(term: &str, words: &WordOccurrenceIndex) -> f64 {
    let lowered = words.count(&term.to_lowercase());
    if lowered == 0 {
        return 1.0;
    }
    let capitalized = words.count(term);
    capitalized as f64 / (capitalized + lowered) as f64
}

fn sentence_start_probability(offsets: &[usize], sentences: &SentenceList) -> f64 {
    if offsets.is_empty() {
        return 1.0;
    }
    let at_start = offsets
        .iter()
        .filter(|&&offset| sentences.is_sentence_start(offset))
        .count();
    1.0 - at_start as f64 / offsets.len() as f64
}

fn distribution_probability(occurrences: usize, stats: &OccurrenceStats) -> f64 {
    let OccurrenceStats { max, min, average } = *stats;

    let apparition = occurrences as f64 / max;
    let range = (max - min) / max;
    let disposition = if max == min {
        1.0
    } else {
        1.0 - ((max + min) / 2.0 - average).abs() / (max - min)
    };

    apparition * range * disposition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::Sentence;

    fn sentences() -> SentenceList {
        SentenceList::new(
            vec![
                Sentence::new("x".repeat(45), 0),
                Sentence::new("y".repeat(55), 45),
            ],
            100,
        )
    }

    fn index(entries: &[(&str, &[usize])]) -> TermOccurrenceIndex {
        entries
            .iter()
            .map(|(term, offsets)| (term.to_string(), offsets.to_vec()))
            .collect()
    }

    #[test]
    fn test_removes_mostly_lowercase_word() {
        let mut terms = index(&[
            ("Alpha", &[10, 50]),
            ("Beta", &[20]),
            ("Gamma Delta", &[30, 40, 60, 70]),
        ]);
        let words = WordOccurrenceIndex::from_counts([("Beta", 1), ("beta", 9)]);

        let removed = TermFilter::default().filter(&mut terms, &words, &sentences());

        assert_eq!(removed, vec!["Beta".to_string()]);
        assert!(terms.contains("Alpha"));
        assert!(terms.contains("Gamma Delta"));
    }

    #[test]
    fn test_beta_score_just_below_tolerance() {
        let terms = index(&[
            ("Alpha", &[10, 50]),
            ("Beta", &[20]),
            ("Gamma Delta", &[30, 40, 60, 70]),
        ]);
        let words = WordOccurrenceIndex::from_counts([("Beta", 1), ("beta", 9)]);
        let stats = OccurrenceStats::collect(&terms).unwrap();

        let filter = TermFilter::default();
        let score = filter.score("Beta", &[20], &words, &sentences(), &stats);
        assert!((score - 0.12317).abs() < 1e-4, "score was {score}");
        assert!(!filter.keeps(score));
    }

    #[test]
    fn test_multi_word_terms_are_never_scored() {
        let mut terms = index(&[("Gamma Delta", &[0]), ("Omega Point", &[45])]);
        let words = WordOccurrenceIndex::from_counts([("gamma", 100)]);
        let removed = TermFilter::default().filter(&mut terms, &words, &sentences());
        assert!(removed.is_empty());
        assert_eq!(terms.len(), 2);
    }

    #[test]
    fn test_equal_lengths_remove_single_words() {
        // range collapses to zero, so only 0.165 * p1 - 0.035 * p2 is left
        let mut terms = index(&[("Alpha", &[10]), ("Beta", &[20]), ("Gamma Delta", &[30])]);
        let words =
            WordOccurrenceIndex::from_counts([("Alpha", 1), ("alpha", 1), ("Beta", 1), ("beta", 1)]);
        let removed = TermFilter::default().filter(&mut terms, &words, &sentences());
        assert_eq!(removed.len(), 2);
        assert!(terms.contains("Gamma Delta"));
    }

    #[test]
    fn test_sentence_start_probability() {
        let list = sentences();
        assert_eq!(sentence_start_probability(&[0, 45], &list), 0.0);
        assert_eq!(sentence_start_probability(&[0, 10], &list), 0.5);
        assert_eq!(sentence_start_probability(&[10, 20], &list), 1.0);
    }

    #[test]
    fn test_capitalization_probability() {
        let words = WordOccurrenceIndex::from_counts([("Term", 3), ("term", 1)]);
        assert_eq!(capitalization_probability("Term", &words), 0.75);
        assert_eq!(capitalization_probability("Other", &words), 1.0);
    }

    #[test]
    fn test_keeps_boundary() {
        let filter = TermFilter::default();
        assert!(filter.keeps(0.13));
        assert!(!filter.keeps(0.12999));
    }

    #[test]
    fn test_empty_index_is_untouched() {
        let mut terms = TermOccurrenceIndex::new();
        let removed =
            TermFilter::default().filter(&mut terms, &WordOccurrenceIndex::default(), &sentences());
        assert!(removed.is_empty());
        assert!(terms.is_empty());
    }

    #[test]
    fn test_filter_only_removes() {
        let mut terms = index(&[
            ("Alpha", &[10, 50]),
            ("Beta", &[20]),
            ("Gamma", &[0, 45, 60]),
            ("Gamma Delta", &[30, 40, 60, 70]),
        ]);
        let before: Vec<String> = terms.keys().map(str::to_string).collect();
        let words = WordOccurrenceIndex::from_counts([("beta", 4), ("gamma", 2)]);

        TermFilter::default().filter(&mut terms, &words, &sentences());

        assert!(terms.keys().all(|k| before.iter().any(|b| b == k)));
    }
}
