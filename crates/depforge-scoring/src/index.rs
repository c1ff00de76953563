//! Fact lookup tables.

use depforge_core::{Constraint, FactId, FactSet, TokenIndex};
use smallvec::SmallVec;

type Bucket = SmallVec<[FactId; 2]>;

/// Index over a [`FactSet`] for constant-time lookup while scoring arcs.
///
/// - `dependency[dependent][head]` holds the dependency facts of one pair
/// - `direction[token]` holds the direction facts of one token
/// - `incoming[token]` holds the incoming-relation facts of one token
///
/// Buckets keep insertion order.
///
/// # Example
///
/// ```
/// use depforge_core::{Constraint, FactSet};
/// use depforge_scoring::FactIndex;
///
/// let facts = FactSet::from_facts(2, [
///     Constraint::dependency(2, 1, "obj", 0.8),
///     Constraint::incoming_relation(1, "obj", 0.4),
/// ]).unwrap();
/// let index = FactIndex::new(&facts);
///
/// assert_eq!(index.dependencies(2, 1).len(), 1);
/// assert!(index.dependencies(1, 2).is_empty());
/// assert_eq!(index.incoming(1).len(), 1);
/// ```
#[derive(Debug)]
pub struct FactIndex<'a> {
    facts: &'a FactSet,
    width: usize,
    dependency: Vec<Bucket>,
    direction: Vec<Bucket>,
    incoming: Vec<Bucket>,
}

impl<'a> FactIndex<'a> {
    /// Indexes every fact of `facts`.
    pub fn new(facts: &'a FactSet) -> Self {
        let width = facts.sentence_length() + 1;
        let mut dependency = vec![Bucket::new(); width * width];
        let mut direction = vec![Bucket::new(); width];
        let mut incoming = vec![Bucket::new(); width];

        for (id, fact) in facts.iter() {
            match fact {
                Constraint::Dependency {
                    dependent, head, ..
                } => dependency[dependent * width + head].push(id),
                Constraint::Direction { token, .. } => direction[*token].push(id),
                Constraint::IncomingRelation { token, .. } => incoming[*token].push(id),
            }
        }

        Self {
            facts,
            width,
            dependency,
            direction,
            incoming,
        }
    }

    /// Returns the indexed fact set.
    #[inline]
    pub fn facts(&self) -> &'a FactSet {
        self.facts
    }

    /// Returns the number of tokens.
    #[inline]
    pub fn sentence_length(&self) -> usize {
        self.width - 1
    }

    /// Dependency facts for `dependent` attaching to `head`.
    #[inline]
    pub fn dependencies(&self, dependent: TokenIndex, head: TokenIndex) -> &[FactId] {
        if dependent >= self.width || head >= self.width {
            return &[];
        }
        &self.dependency[dependent * self.width + head]
    }

    /// Direction facts of `token`.
    #[inline]
    pub fn directions(&self, token: TokenIndex) -> &[FactId] {
        self.direction.get(token).map(|bucket| bucket.as_slice()).unwrap_or(&[])
    }

    /// Incoming-relation facts of `token`.
    #[inline]
    pub fn incoming(&self, token: TokenIndex) -> &[FactId] {
        self.incoming.get(token).map(|bucket| bucket.as_slice()).unwrap_or(&[])
    }
}
