//! Fixture parser shared by the integration tests

#![allow(dead_code)]

use glossa_engine::{ConstituencyParser, ParseError, ParseTree};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const MEANS_SENTENCE: &str = "\"Company\" means Beagle Inc., a Delaware corporation.";

pub const MEANS_TREE: &str = "(ROOT (S (NP (`` ``) (NNP Company) ('' '')) (VP (VBZ means) \
    (NP (NP (NNP Beagle) (NNP Inc.)) (, ,) (NP (DT a) (NNP Delaware) (NN corporation)))) (. .)))";

pub const PRN_SENTENCE: &str = "Beagle Inc. (the \"Company\") agrees to the terms.";

pub const PRN_TREE: &str = "(ROOT (S (NP (NP (NNP Beagle) (NNP Inc.)) (PRN (-LRB- -LRB-) \
    (NP (DT the) (`` ``) (NNP Company) ('' '')) (-RRB- -RRB-))) \
    (VP (VBZ agrees) (PP (TO to) (NP (DT the) (NNS terms)))) (. .)))";

/// Maps sentences (whitespace-collapsed) to bracketed trees
#[derive(Default)]
pub struct FixtureParser {
    trees: HashMap<String, String>,
    calls: AtomicUsize,
}

fn collapse(sentence: &str) -> String {
    sentence.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl FixtureParser {
    /// Parser knowing the two reference sentences
    pub fn contracts() -> Self {
        Self::default()
            .with(MEANS_SENTENCE, MEANS_TREE)
            .with(PRN_SENTENCE, PRN_TREE)
    }

    pub fn with(mut self, sentence: &str, tree: &str) -> Self {
        self.trees.insert(collapse(sentence), tree.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConstituencyParser for FixtureParser {
    fn parse(&self, sentence: &str) -> Result<ParseTree, ParseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.trees.get(&collapse(sentence)) {
            Some(tree) => Ok(ParseTree::from_bracketed(tree)?),
            None => Err(ParseError::Unavailable(sentence.to_string())),
        }
    }
}
