//! Parse results.

use std::fmt;

use crate::{TokenIndex, ROOT};

/// The head and relation label assigned to one token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    /// Head token, 0 for the virtual root.
    pub head: TokenIndex,
    /// Relation label; empty when the token was never attached.
    pub label: String,
}

impl Attachment {
    /// Creates an attachment.
    pub fn new(head: TokenIndex, label: impl Into<String>) -> Self {
        Self {
            head,
            label: label.into(),
        }
    }

    /// The "not parsed" sentinel: head 0 with an empty label.
    pub fn unattached() -> Self {
        Self::default()
    }

    /// Returns true for the "not parsed" sentinel.
    pub fn is_unattached(&self) -> bool {
        self.head == ROOT && self.label.is_empty()
    }
}

/// A labelled edge of a dependency tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<'a> {
    pub head: TokenIndex,
    pub dependent: TokenIndex,
    pub label: &'a str,
}

impl Edge<'_> {
    /// Returns the leftmost and rightmost index covered by the edge.
    #[inline]
    pub fn span(&self) -> (TokenIndex, TokenIndex) {
        if self.head < self.dependent {
            (self.head, self.dependent)
        } else {
            (self.dependent, self.head)
        }
    }

    /// Returns true if the two edges interleave on the index line.
    pub fn crosses(&self, other: &Edge<'_>) -> bool {
        let (a1, b1) = self.span();
        let (a2, b2) = other.span();
        (a1 < a2 && a2 < b1 && b1 < b2) || (a2 < a1 && a1 < b2 && b2 < b1)
    }
}

/// A dependency tree over the tokens `1..=N`.
///
/// Attachments are index-aligned to the sentence: token `i` is stored at
/// position `i - 1`.
///
/// # Example
///
/// ```
/// use depforge_core::{Attachment, DependencyTree};
///
/// let tree = DependencyTree::new(vec![
///     Attachment::new(0, "ROOT"),
///     Attachment::new(1, "obj"),
/// ]);
/// assert_eq!(tree.get(2).unwrap().head, 1);
/// assert_eq!(tree.heads(), vec![0, 1]);
/// assert!(tree.is_projective());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DependencyTree {
    attachments: Vec<Attachment>,
}

impl DependencyTree {
    /// Creates a tree from index-aligned attachments.
    pub fn new(attachments: Vec<Attachment>) -> Self {
        Self { attachments }
    }

    /// Creates a tree in which every token is unattached.
    pub fn unattached(sentence_length: usize) -> Self {
        Self {
            attachments: vec![Attachment::unattached(); sentence_length],
        }
    }

    /// Returns the attachment of token `token` (1-based).
    pub fn get(&self, token: TokenIndex) -> Option<&Attachment> {
        token
            .checked_sub(1)
            .and_then(|position| self.attachments.get(position))
    }

    /// Returns the attachments in token order.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Consumes the tree, returning the attachments.
    pub fn into_attachments(self) -> Vec<Attachment> {
        self.attachments
    }

    /// Returns the head of every token, in token order.
    pub fn heads(&self) -> Vec<TokenIndex> {
        self.attachments.iter().map(|a| a.head).collect()
    }

    /// Iterates over the edges of the tree, in dependent order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.attachments
            .iter()
            .enumerate()
            .map(|(position, attachment)| Edge {
                head: attachment.head,
                dependent: position + 1,
                label: attachment.label.as_str(),
            })
    }

    /// Returns every pair of crossing edges.
    pub fn crossing_edges(&self) -> Vec<(Edge<'_>, Edge<'_>)> {
        let edges: Vec<_> = self.edges().collect();
        let mut crossings = Vec::new();
        for (i, first) in edges.iter().enumerate() {
            for second in &edges[i + 1..] {
                if first.crosses(second) {
                    crossings.push((*first, *second));
                }
            }
        }
        crossings
    }

    /// Returns true if no two edges cross.
    pub fn is_projective(&self) -> bool {
        self.crossing_edges().is_empty()
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    /// Returns true for a tree over an empty sentence.
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }
}

impl fmt::Display for DependencyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.edges().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}<-{}:{}", arc.dependent, arc.head, arc.label)?;
        }
        Ok(())
    }
}
