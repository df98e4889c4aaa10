//! `<Definition> (... "<Term>" ...)` constructions

use crate::tree::{NodeId, ParseTree};

const LEFT_BRACKET: &str = "-LRB-";
const RIGHT_BRACKET: &str = "-RRB-";

/// What a scan of one node's direct children found
#[derive(Debug, Clone, Copy, Default)]
struct BracketScan {
    /// Children before the first `-LRB-`
    extra_words: usize,
    bracket_found: bool,
    /// The last child is not `-RRB-`
    unwanted_child_found: bool,
}

impl BracketScan {
    fn of(tree: &ParseTree, node: NodeId) -> Self {
        let children = tree.children(node);
        let first_bracket = children
            .iter()
            .position(|&child| tree.label(child) == LEFT_BRACKET);

        Self {
            extra_words: first_bracket.unwrap_or(children.len()),
            bracket_found: first_bracket.is_some(),
            unwanted_child_found: children
                .last()
                .is_some_and(|&last| tree.label(last) != RIGHT_BRACKET),
        }
    }
}

/// Solve a `Definition (the "Term")` construction
///
/// Finds the bracketed subtree holding the `nth` occurrence of the term and
/// returns the noun phrase (or failing that, the clause) that precedes it.
pub fn solve_met2(tree: &ParseTree, term_tokens: &[&str], nth: usize) -> Option<String> {
    let leaf_position = tree.find_token_sequence(term_tokens, nth)?;
    let leaf = tree.leaves()[leaf_position];

    let mut structure = tree.ancestor(leaf, 2)?;
    let mut scan = BracketScan::of(tree, structure);
    while !scan.bracket_found {
        let Some(parent) = tree.parent(structure) else {
            break;
        };
        structure = parent;
        scan = BracketScan::of(tree, structure);
    }
    if structure == tree.root() {
        return None;
    }

    let mut noun_phrase = None;
    let mut clause = tree.parent(structure)?;
    while !matches!(tree.label(clause), "S" | "ROOT") {
        if noun_phrase.is_none() && tree.label(clause) == "NP" {
            noun_phrase = Some(clause);
        }
        clause = tree.parent(clause)?;
    }
    if clause == tree.root() {
        return None;
    }

    let definition_tree = match noun_phrase {
        Some(np) if !scan.unwanted_child_found => np,
        _ => clause,
    };

    let outer = tree.span(definition_tree);
    let inner = tree.span(structure);

    let mut tokens = tree.tokens_in(outer.start..inner.start);
    for &child in tree.children(structure).iter().take(scan.extra_words) {
        tokens.extend(tree.leaf_tokens(child));
    }

    let in_subordinate = tree
        .parent(clause)
        .is_some_and(|parent| tree.label(parent) == "SBAR");
    if in_subordinate && tree.parent(definition_tree) != Some(clause) {
        tokens.extend(tree.tokens_in(inner.end..outer.end));
    }

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}
