//! Result assembly
//!
//! Turns resolved definitions into the serializable [`Glossary`], restoring
//! the parentheses that the parser escaped as `-LRB-`/`-RRB-`.

use crate::resolver::ResolvedDefinition;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One glossary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionRecord {
    /// The defined term
    #[serde(rename = "Term")]
    pub term: String,
    /// Its definition text
    #[serde(rename = "Definition")]
    pub definition: String,
}

/// Extraction result for one document
///
/// Serializes to `{"definitions": [...], "Time": "<seconds>"}`, or to `{}`
/// when nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Glossary {
    /// Entries in order of the term's first occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<Vec<DefinitionRecord>>,
    /// Wall-clock extraction time in seconds
    #[serde(rename = "Time", default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Glossary {
    /// The empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no definition was found
    pub fn is_empty(&self) -> bool {
        self.definitions.as_ref().map_or(true, Vec::is_empty)
    }

    /// Entries, empty when nothing was found
    pub fn entries(&self) -> &[DefinitionRecord] {
        self.definitions.as_deref().unwrap_or(&[])
    }

    /// Look up the definition of a term
    pub fn get(&self, term: &str) -> Option<&str> {
        self.entries()
            .iter()
            .find(|record| record.term == term)
            .map(|record| record.definition.as_str())
    }
}

/// Packages resolved definitions
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAssembler;

impl ResultAssembler {
    /// Create a new result assembler
    pub fn new() -> Self {
        Self
    }

    /// Build the glossary from resolved definitions
    pub fn assemble(&self, resolved: Vec<ResolvedDefinition>, elapsed: Duration) -> Glossary {
        let definitions: Vec<DefinitionRecord> = resolved
            .into_iter()
            .filter(|(_, definition)| !definition.is_empty())
            .map(|(term, definition)| DefinitionRecord {
                term,
                definition: restore_brackets(&definition),
            })
            .collect();

        if definitions.is_empty() {
            return Glossary::empty();
        }

        Glossary {
            definitions: Some(definitions),
            time: Some(elapsed.as_secs_f64().to_string()),
        }
    }
}

/// Replace the parser's bracket placeholders with literal parentheses
pub fn restore_brackets(text: &str) -> String {
    text.replace("-LRB- ", "(").replace(" -RRB-", ")")
}
