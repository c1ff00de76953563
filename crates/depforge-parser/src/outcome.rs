//! Parse results.

use depforge_core::DependencyTree;
use depforge_scoring::TreeAnalysis;

/// Result of parsing one sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// One `(head, label)` per token, in token order.
    pub tree: DependencyTree,
    /// Chart score of the tree.
    pub score: f64,
    /// Per-arc breakdown of `score`.
    pub analysis: TreeAnalysis,
}

impl ParseOutcome {
    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true for an empty sentence.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Consumes the outcome, returning the tree.
    pub fn into_tree(self) -> DependencyTree {
        self.tree
    }
}
