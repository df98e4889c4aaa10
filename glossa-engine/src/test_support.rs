//! Shared fixtures for unit tests

use crate::error::ParseError;
use crate::parser::ConstituencyParser;
use crate::tree::ParseTree;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const MEANS_SENTENCE: &str = "\"Company\" means Beagle Inc., a Delaware corporation.";

pub const MEANS_TREE: &str = "(ROOT (S (NP (`` ``) (NNP Company) ('' '')) (VP (VBZ means) \
    (NP (NP (NNP Beagle) (NNP Inc.)) (, ,) (NP (DT a) (NNP Delaware) (NN corporation)))) (. .)))";

pub const PRN_SENTENCE: &str = "Beagle Inc. (the \"Company\") agrees to the terms.";

pub const PRN_TREE: &str = "(ROOT (S (NP (NP (NNP Beagle) (NNP Inc.)) (PRN (-LRB- -LRB-) \
    (NP (DT the) (`` ``) (NNP Company) ('' '')) (-RRB- -RRB-))) \
    (VP (VBZ agrees) (PP (TO to) (NP (DT the) (NNS terms)))) (. .)))";

/// Parser answering from a fixed table and counting calls
#[derive(Default)]
pub struct TableParser {
    trees: HashMap<String, &'static str>,
    calls: AtomicUsize,
}

impl TableParser {
    pub fn with(mut self, sentence: &str, tree: &'static str) -> Self {
        self.trees.insert(sentence.to_string(), tree);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConstituencyParser for TableParser {
    fn parse(&self, sentence: &str) -> Result<ParseTree, ParseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let tree = self
            .trees
            .get(sentence)
            .ok_or_else(|| ParseError::Unavailable(sentence.to_string()))?;
        Ok(ParseTree::from_bracketed(tree)?)
    }
}
