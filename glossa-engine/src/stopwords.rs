//! Stopword list
//!
//! Built-in lists come from the `stop-words` crate; callers may extend them
//! with their own words. Lookups are case-insensitive.

use std::collections::HashSet;
use stop_words::{get, LANGUAGE};

/// Case-insensitive set of stopwords
#[derive(Debug, Clone, Default)]
pub struct StopwordList {
    /// Lowercased stopwords
    words: HashSet<String>,
}

impl StopwordList {
    /// Load the built-in list for a language code (unknown codes get English)
    pub fn new(language: &str) -> Self {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            other => {
                log::warn!("no stopword list for '{other}', using English");
                LANGUAGE::English
            }
        };

        Self {
            words: get(lang).iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// Create a list from explicit words
    pub fn from_list<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        list.extend(words);
        list
    }

    /// Add words to the list
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    /// Check if a word is a stopword, ignoring case
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of stopwords
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_list_is_case_insensitive() {
        let list = StopwordList::new("en");
        assert!(!list.is_empty());
        assert!(list.contains("the"));
        assert!(list.contains("The"));
        assert!(list.contains("THE"));
        assert!(!list.contains("Buyer"));
    }

    #[test]
    fn test_extend() {
        let mut list = StopwordList::from_list(["hereby"]);
        list.extend(["Whereas"]);
        assert!(list.contains("HEREBY"));
        assert!(list.contains("whereas"));
        assert_eq!(list.len(), 2);
    }
}
