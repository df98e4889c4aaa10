//! Constituency parse trees
//!
//! Trees are stored as an arena: nodes live in one vector and refer to their
//! parent and children by index. Leaves are nodes of their own (labelled with
//! their token) below the part-of-speech node, as in Penn Treebank output.
//!
//! Every node also knows the range of leaf positions it covers, so mapping a
//! subtree back to its place in the token sequence is a lookup.

use crate::error::TreeError;
use std::ops::Range;

/// Index of a node within its [`ParseTree`]
pub type NodeId = usize;

/// Arena node
#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    /// Constituent label, or the token for leaves
    label: String,
    /// Parent node (None for the root)
    parent: Option<NodeId>,
    /// Ordered children
    children: Vec<NodeId>,
    /// Whether this node is a token
    is_leaf: bool,
    /// Leaf positions covered by this node
    span: Range<usize>,
}

/// Parented constituency tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<Node>,
    /// Leaf node ids in sentence order
    leaves: Vec<NodeId>,
}

enum Lexeme<'a> {
    Open,
    Close,
    Atom(&'a str),
}

/// Split bracketed text into brackets and atoms with their byte positions
fn lex(input: &str) -> impl Iterator<Item = (usize, Lexeme<'_>)> {
    let mut rest = input.char_indices().peekable();
    std::iter::from_fn(move || loop {
        let (pos, ch) = rest.next()?;
        match ch {
            '(' => return Some((pos, Lexeme::Open)),
            ')' => return Some((pos, Lexeme::Close)),
            c if c.is_whitespace() => continue,
            _ => {
                let mut end = pos + ch.len_utf8();
                while let Some(&(next_pos, next)) = rest.peek() {
                    if next == '(' || next == ')' || next.is_whitespace() {
                        break;
                    }
                    end = next_pos + next.len_utf8();
                    rest.next();
                }
                return Some((pos, Lexeme::Atom(&input[pos..end])));
            }
        }
    })
}

impl ParseTree {
    /// Label given to an unlabelled outermost bracket
    pub const ROOT_LABEL: &'static str = "ROOT";

    /// Read a Penn-Treebank bracketed tree such as `(ROOT (S (NP (NNP Acme))))`
    pub fn from_bracketed(input: &str) -> Result<Self, TreeError> {
        let mut nodes: Vec<Node> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut expect_label = false;

        for (position, lexeme) in lex(input) {
            match lexeme {
                Lexeme::Open => {
                    if stack.is_empty() && !nodes.is_empty() {
                        return Err(TreeError::TrailingInput { position });
                    }
                    let id = nodes.len();
                    let parent = stack.last().copied();
                    nodes.push(Node {
                        label: String::new(),
                        parent,
                        children: Vec::new(),
                        is_leaf: false,
                        span: 0..0,
                    });
                    if let Some(parent) = parent {
                        nodes[parent].children.push(id);
                    }
                    stack.push(id);
                    expect_label = true;
                }
                Lexeme::Close => {
                    let id = stack.pop().ok_or(TreeError::UnexpectedClose { position })?;
                    if nodes[id].children.is_empty() {
                        return Err(TreeError::EmptyNode {
                            label: nodes[id].label.clone(),
                        });
                    }
                    expect_label = false;
                }
                Lexeme::Atom(text) => {
                    let Some(&parent) = stack.last() else {
                        return Err(if nodes.is_empty() {
                            TreeError::StrayToken { position }
                        } else {
                            TreeError::TrailingInput { position }
                        });
                    };
                    if expect_label {
                        nodes[parent].label = text.to_string();
                        expect_label = false;
                    } else {
                        let id = nodes.len();
                        nodes.push(Node {
                            label: text.to_string(),
                            parent: Some(parent),
                            children: Vec::new(),
                            is_leaf: true,
                            span: 0..0,
                        });
                        nodes[parent].children.push(id);
                    }
                }
            }
        }

        if !stack.is_empty() {
            return Err(TreeError::Unclosed);
        }
        if nodes.is_empty() {
            return Err(TreeError::Empty);
        }
        if nodes[0].label.is_empty() {
            nodes[0].label = Self::ROOT_LABEL.to_string();
        }

        // Ids are assigned in pre-order, so ascending ids visit leaves in
        // sentence order and children always come after their parent.
        let leaves: Vec<NodeId> = (0..nodes.len()).filter(|&id| nodes[id].is_leaf).collect();
        for (position, &id) in leaves.iter().enumerate() {
            nodes[id].span = position..position + 1;
        }
        for id in (0..nodes.len()).rev() {
            let span = match (nodes[id].children.first(), nodes[id].children.last()) {
                (Some(&first), Some(&last)) => nodes[first].span.start..nodes[last].span.end,
                _ => continue,
            };
            nodes[id].span = span;
        }

        Ok(Self { nodes, leaves })
    }

    /// The root node
    pub fn root(&self) -> NodeId {
        0
    }

    /// Label of a node (the token, for leaves)
    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id].label
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Ordered children of a node
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Whether a node is a token
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id].is_leaf
    }

    /// Leaf node ids in sentence order
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Number of tokens
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Leaf positions covered by a node
    pub fn span(&self, id: NodeId) -> Range<usize> {
        self.nodes[id].span.clone()
    }

    /// Tokens of the leaf positions in `range`
    pub fn tokens_in(&self, range: Range<usize>) -> Vec<&str> {
        self.leaves[range]
            .iter()
            .map(|&leaf| self.label(leaf))
            .collect()
    }

    /// Tokens covered by a node
    pub fn leaf_tokens(&self, id: NodeId) -> Vec<&str> {
        self.tokens_in(self.span(id))
    }

    /// Walk `levels` parents up
    pub fn ancestor(&self, id: NodeId, levels: usize) -> Option<NodeId> {
        (0..levels).try_fold(id, |node, _| self.parent(node))
    }

    /// Nearest proper ancestor carrying `label`
    pub fn nearest_ancestor(&self, id: NodeId, label: &str) -> Option<NodeId> {
        let mut node = self.parent(id);
        while let Some(current) = node {
            if self.label(current) == label {
                return Some(current);
            }
            node = self.parent(current);
        }
        None
    }

    /// First direct child carrying `label`
    pub fn child_labeled(&self, id: NodeId, label: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| !self.is_leaf(child) && self.label(child) == label)
    }

    /// First node labelled `label` in a pre-order walk of the subtree at `id`
    pub fn find_descendant(&self, id: NodeId, label: &str) -> Option<NodeId> {
        let mut pending = vec![id];
        while let Some(node) = pending.pop() {
            if !self.is_leaf(node) && self.label(node) == label {
                return Some(node);
            }
            pending.extend(self.children(node).iter().rev());
        }
        None
    }

    /// Siblings following a node, in order
    pub fn right_siblings(&self, id: NodeId) -> &[NodeId] {
        let Some(parent) = self.parent(id) else {
            return &[];
        };
        let siblings = self.children(parent);
        match siblings.iter().position(|&s| s == id) {
            Some(index) => &siblings[index + 1..],
            None => &[],
        }
    }

    /// Leaf position where the `nth` (1-based) run of `tokens` starts
    pub fn find_token_sequence(&self, tokens: &[&str], nth: usize) -> Option<usize> {
        if tokens.is_empty() || nth == 0 || tokens.len() > self.leaves.len() {
            return None;
        }
        (0..=self.leaves.len() - tokens.len())
            .filter(|&start| {
                tokens
                    .iter()
                    .enumerate()
                    .all(|(i, token)| self.label(self.leaves[start + i]) == *token)
            })
            .nth(nth - 1)
    }
}
