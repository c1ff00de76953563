//! Classifier instance layout.
//!
//! The constraint builder attributes each classifier result to a token (or
//! token pair) purely by its position in the stream. The layout is the one
//! definition of that order; feature construction must emit its instances
//! in the same order, or facts end up on the wrong tokens.

use depforge_core::TokenIndex;

/// One instance of the edge stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeInstance {
    /// Should `dependent` attach to the virtual root?
    Root { dependent: TokenIndex },
    /// Should `dependent` attach to `head`?
    Pair {
        dependent: TokenIndex,
        head: TokenIndex,
    },
}

impl EdgeInstance {
    /// Returns the dependent token of the instance.
    pub fn dependent(&self) -> TokenIndex {
        match self {
            EdgeInstance::Root { dependent } | EdgeInstance::Pair { dependent, .. } => *dependent,
        }
    }

    /// Returns the candidate head, 0 for root instances.
    pub fn head(&self) -> TokenIndex {
        match self {
            EdgeInstance::Root { .. } => depforge_core::ROOT,
            EdgeInstance::Pair { head, .. } => *head,
        }
    }
}

/// Instance order for a sentence of `sentence_length` tokens.
///
/// # Example
///
/// ```
/// use depforge_constraints::{EdgeInstance, InstanceLayout};
///
/// let layout = InstanceLayout::new(3, 1);
/// let edges: Vec<_> = layout.edge_instances().collect();
///
/// assert_eq!(layout.edge_count(), 3 + 4);
/// assert_eq!(edges[0], EdgeInstance::Root { dependent: 1 });
/// assert_eq!(edges[3], EdgeInstance::Pair { dependent: 1, head: 2 });
/// assert_eq!(edges[6], EdgeInstance::Pair { dependent: 3, head: 2 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceLayout {
    sentence_length: usize,
    max_span: usize,
}

impl InstanceLayout {
    /// Creates the layout for a sentence.
    pub fn new(sentence_length: usize, max_span: usize) -> Self {
        Self {
            sentence_length,
            max_span,
        }
    }

    /// Returns the number of tokens.
    pub fn sentence_length(&self) -> usize {
        self.sentence_length
    }

    /// Returns the candidate window.
    pub fn max_span(&self) -> usize {
        self.max_span
    }

    // Candidate heads of `dependent` form the range lo..=hi minus the
    // dependent itself.
    fn head_window(&self, dependent: TokenIndex) -> (TokenIndex, TokenIndex) {
        let lo = dependent.saturating_sub(self.max_span).max(1);
        let hi = (dependent + self.max_span).min(self.sentence_length);
        (lo, hi)
    }

    /// Returns the number of pair instances for `dependent`.
    pub fn pair_count_for(&self, dependent: TokenIndex) -> usize {
        if dependent == 0 || dependent > self.sentence_length {
            return 0;
        }
        let (lo, hi) = self.head_window(dependent);
        hi - lo
    }

    /// Returns the expected length of the edge stream.
    pub fn edge_count(&self) -> usize {
        self.sentence_length
            + (1..=self.sentence_length)
                .map(|d| self.pair_count_for(d))
                .sum::<usize>()
    }

    /// Returns the expected length of the direction and role streams.
    pub fn token_count(&self) -> usize {
        self.sentence_length
    }

    /// Iterates over the edge instances: root instances in token order,
    /// then pair instances nested by dependent, then head.
    pub fn edge_instances(&self) -> impl Iterator<Item = EdgeInstance> + '_ {
        let roots = (1..=self.sentence_length).map(|dependent| EdgeInstance::Root { dependent });
        roots.chain(self.pair_instances())
    }

    /// Iterates over the pair instances only.
    pub fn pair_instances(&self) -> impl Iterator<Item = EdgeInstance> + '_ {
        (1..=self.sentence_length).flat_map(move |dependent| {
            let (lo, hi) = self.head_window(dependent);
            (lo..=hi)
                .filter(move |&head| head != dependent)
                .map(move |head| EdgeInstance::Pair { dependent, head })
        })
    }

    /// Iterates over the per-token instances of the direction and role
    /// streams.
    pub fn token_instances(&self) -> impl Iterator<Item = TokenIndex> {
        1..=self.sentence_length
    }
}
