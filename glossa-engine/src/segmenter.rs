//! Sentence segmentation with bad-split repair
//!
//! Raw sentences from the splitter are located in the text to recover their
//! byte offsets, then spurious breaks (stub fragments such as bullets or page
//! numbers, and fragments continuing in lowercase) are merged back. Merging
//! re-slices the original text, so every offset stays valid for lookups.

use crate::tokenize::SentenceSplitter;

/// One sentence and its byte offset in the normalized text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Sentence text, a slice of the document
    pub text: String,
    /// Byte offset of the first character
    pub start: usize,
}

impl Sentence {
    /// Create a sentence
    pub fn new(text: impl Into<String>, start: usize) -> Self {
        Self {
            text: text.into(),
            start,
        }
    }

    /// Byte offset one past the last character
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Uppercase share of cased letters (0.0 when there are none)
    pub fn uppercase_ratio(&self) -> f64 {
        let (upper, lower) = self.text.chars().fold((0usize, 0usize), |(u, l), c| {
            if c.is_uppercase() {
                (u + 1, l)
            } else if c.is_lowercase() {
                (u, l + 1)
            } else {
                (u, l)
            }
        });

        if upper + lower == 0 {
            0.0
        } else {
            upper as f64 / (upper + lower) as f64
        }
    }

    /// Whether the sentence reads like a heading
    pub fn is_all_caps(&self, threshold: f64) -> bool {
        self.uppercase_ratio() > threshold
    }
}

/// Ordered sentences of a document, terminated by a `("", len)` sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceList {
    sentences: Vec<Sentence>,
}

impl SentenceList {
    /// Build a list from ordered sentences and append the sentinel
    pub fn new(mut sentences: Vec<Sentence>, text_len: usize) -> Self {
        sentences.push(Sentence::new("", text_len));
        Self { sentences }
    }

    /// Real sentences, without the sentinel
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences[..self.sentences.len() - 1]
    }

    /// All entries including the sentinel
    pub fn with_sentinel(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Number of real sentences
    pub fn len(&self) -> usize {
        self.sentences.len() - 1
    }

    /// Whether there are no real sentences
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The terminal sentinel
    pub fn sentinel(&self) -> &Sentence {
        &self.sentences[self.sentences.len() - 1]
    }

    /// Find the sentence containing `offset`
    ///
    /// Returns index `i` with `start[i] <= offset < start[i + 1]`.
    pub fn containing(&self, offset: usize) -> Option<(usize, &Sentence)> {
        let idx = self.sentences.partition_point(|s| s.start <= offset);
        if idx == 0 || idx >= self.sentences.len() {
            return None;
        }
        Some((idx - 1, &self.sentences[idx - 1]))
    }

    /// Whether a sentence begins exactly at `offset`
    pub fn is_sentence_start(&self, offset: usize) -> bool {
        self.sentences()
            .binary_search_by_key(&offset, |s| s.start)
            .is_ok()
    }
}

/// Splits normalized text into located, repaired sentences
pub struct SentenceSegmenter<'a> {
    splitter: &'a dyn SentenceSplitter,
    min_fragment_chars: usize,
}

impl<'a> SentenceSegmenter<'a> {
    /// Create a segmenter around a sentence splitter
    pub fn new(splitter: &'a dyn SentenceSplitter, min_fragment_chars: usize) -> Self {
        Self {
            splitter,
            min_fragment_chars,
        }
    }

    /// Segment `text`
    pub fn segment(&self, text: &str) -> SentenceList {
        let mut fragments = self.locate_fragments(text);
        self.repair(text, &mut fragments);

        let sentences = fragments
            .into_iter()
            .map(|(start, end)| Sentence::new(&text[start..end], start))
            .collect();

        SentenceList::new(sentences, text.len())
    }

    /// Byte ranges of every non-empty fragment, in order
    fn locate_fragments(&self, text: &str) -> Vec<(usize, usize)> {
        let mut fragments = Vec::new();
        let mut cursor = 0;

        for raw in self.splitter.split(text) {
            for piece in raw.split('\n').map(str::trim).filter(|p| !p.is_empty()) {
                match text[cursor..].find(piece) {
                    Some(rel) => {
                        let start = cursor + rel;
                        let end = start + piece.len();
                        fragments.push((start, end));
                        cursor = end;
                    }
                    None => log::warn!("sentence fragment not found in text: {piece:?}"),
                }
            }
        }

        fragments
    }

    /// Merge stub fragments and lowercase continuations into their predecessor
    fn repair(&self, text: &str, fragments: &mut Vec<(usize, usize)>) {
        let mut i = 0;
        while i + 1 < fragments.len() {
            let (next_start, next_end) = fragments[i + 1];
            let next = &text[next_start..next_end];

            if next.chars().count() < self.min_fragment_chars || continues_lowercase(next) {
                fragments[i].1 = next_end;
                fragments.remove(i + 1);
            } else {
                i += 1;
            }
        }
    }
}

/// Whether a fragment reads as the continuation of the previous sentence
///
/// True when its first letter is lowercase, looking inside a leading `(`
/// unless the parenthesis holds an enumerator such as `(a)` or `(iv)`.
fn continues_lowercase(fragment: &str) -> bool {
    let Some(pos) = fragment.find(|c: char| c.is_alphabetic() || c == '(') else {
        return false;
    };
    let rest = &fragment[pos..];
    match rest.strip_prefix('(') {
        Some(inner) => !starts_with_enumerator(inner) && continues_lowercase(inner),
        None => rest.chars().next().is_some_and(char::is_lowercase),
    }
}

fn starts_with_enumerator(inner: &str) -> bool {
    inner.split_once(')').is_some_and(|(label, _)| {
        !label.is_empty() && label.len() <= 4 && label.chars().all(char::is_alphanumeric)
    })
}
