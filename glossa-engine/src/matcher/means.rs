//! `"<Term>" means <Definition>` constructions

use crate::tree::ParseTree;

/// Solve a `"Term" means/refers Definition` clause
///
/// The tree is expected to start at the quoted term. The definition is the
/// noun phrase governed by the first third-person verb (`VBZ`) of the
/// clause's verb phrase.
pub fn solve_met1(tree: &ParseTree, term_tokens: &[&str]) -> Option<String> {
    let leaf_position = tree.find_token_sequence(term_tokens, 1)?;
    let leaf = tree.leaves()[leaf_position];

    let clause = tree.nearest_ancestor(leaf, "S")?;
    let verb_phrase = tree.child_labeled(clause, "VP")?;
    let verb = tree.find_descendant(verb_phrase, "VBZ")?;

    let siblings = tree.right_siblings(verb);
    let object = siblings
        .iter()
        .copied()
        .find(|&sibling| !tree.is_leaf(sibling) && tree.label(sibling) == "NP")
        .or_else(|| {
            siblings
                .iter()
                .find_map(|&sibling| tree.find_descendant(sibling, "NP"))
        })?;

    Some(tree.leaf_tokens(object).join(" "))
}
