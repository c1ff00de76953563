//! Edge scoring.
//!
//! Scores a single candidate arc `head -> dependent` against the facts of a
//! sentence, skipping every fact already counted in either child cell of the
//! chart.

use depforge_config::RelationSlot;
use depforge_core::{Constraint, Direction, FactId, FactSet, TokenIndex, ROOT, ROOT_LABEL};
use smallvec::SmallVec;

use crate::index::FactIndex;
use crate::satisfied::SatisfiedSet;

/// Score of a non-root arc no dependency fact supports.
///
/// Lower than any supported arc, so unsupported attachments are chosen only
/// when nothing better fits.
pub const UNSUPPORTED_EDGE_SCORE: f64 = -0.5;

/// The outcome of scoring one arc.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeScore {
    pub score: f64,
    /// Relation label of the arc; empty for unsupported arcs.
    pub label: String,
    /// Facts the arc counts, ascending by id.
    pub consumed: SmallVec<[FactId; 4]>,
}

impl EdgeScore {
    /// The floor result of an arc without a matching dependency fact.
    pub fn unsupported() -> Self {
        Self {
            score: UNSUPPORTED_EDGE_SCORE,
            label: String::new(),
            consumed: SmallVec::new(),
        }
    }

    /// Returns true if at least one fact backs the arc.
    pub fn is_supported(&self) -> bool {
        !self.consumed.is_empty()
    }
}

/// Scores arcs over one indexed fact set.
///
/// # Example
///
/// ```
/// use depforge_config::RelationSlot;
/// use depforge_core::{Constraint, Direction, FactSet};
/// use depforge_scoring::{EdgeScorer, SatisfiedSet};
///
/// let facts = FactSet::from_facts(2, [
///     Constraint::dependency(2, 1, "obj", 1.0),
///     Constraint::direction(2, Direction::Left, 0.5),
/// ]).unwrap();
/// let scorer = EdgeScorer::new(&facts, RelationSlot::Head);
/// let empty = SatisfiedSet::new();
///
/// let edge = scorer.score_edge(1, 2, &empty, &empty);
/// assert_eq!(edge.score, 1.5);
/// assert_eq!(edge.label, "obj");
/// ```
#[derive(Debug)]
pub struct EdgeScorer<'a> {
    index: FactIndex<'a>,
    relation_slot: RelationSlot,
}

impl<'a> EdgeScorer<'a> {
    /// Indexes `facts` and creates a scorer.
    pub fn new(facts: &'a FactSet, relation_slot: RelationSlot) -> Self {
        Self {
            index: FactIndex::new(facts),
            relation_slot,
        }
    }

    /// Returns the fact index.
    pub fn index(&self) -> &FactIndex<'a> {
        &self.index
    }

    /// Returns the scored fact set.
    pub fn facts(&self) -> &'a FactSet {
        self.index.facts()
    }

    /// Scores the arc `head -> dependent` given the satisfied sets of the two
    /// child cells.
    ///
    /// Facts contained in `left` or `right` are never counted again.
    pub fn score_edge(
        &self,
        head: TokenIndex,
        dependent: TokenIndex,
        left: &SatisfiedSet,
        right: &SatisfiedSet,
    ) -> EdgeScore {
        let counted = |id: FactId| left.contains(id) || right.contains(id);
        if head == ROOT {
            self.score_root(dependent, counted)
        } else {
            self.score_attachment(head, dependent, counted)
        }
    }

    // All root evidence for the dependent forms one aggregate candidate.
    fn score_root(&self, dependent: TokenIndex, counted: impl Fn(FactId) -> bool) -> EdgeScore {
        let facts = self.facts();
        let mut score: f64 = 0.0;
        let mut label: &str = ROOT_LABEL;
        let mut consumed = SmallVec::new();

        for &id in self.index.directions(dependent) {
            if counted(id) {
                continue;
            }
            if let Constraint::Direction {
                direction: Direction::Root,
                weight,
                ..
            } = facts.get(id)
            {
                score += weight;
                consumed.push(id);
            }
        }

        for &id in self.index.dependencies(dependent, ROOT) {
            if counted(id) {
                continue;
            }
            if let Constraint::Dependency {
                label: fact_label,
                weight,
                ..
            } = facts.get(id)
            {
                score += weight;
                label = fact_label.as_str();
                consumed.push(id);
            }
        }

        consumed.sort_unstable();
        EdgeScore {
            score,
            label: label.to_string(),
            consumed,
        }
    }

    // One candidate per unconsumed dependency fact; the strictly highest
    // total wins, starting from the unsupported floor.
    fn score_attachment(
        &self,
        head: TokenIndex,
        dependent: TokenIndex,
        counted: impl Fn(FactId) -> bool,
    ) -> EdgeScore {
        let facts = self.facts();
        let relation_token = match self.relation_slot {
            RelationSlot::Head => head,
            RelationSlot::Dependent => dependent,
        };
        let expected = Direction::between(head, dependent);
        let mut best = EdgeScore::unsupported();

        for &candidate in self.index.dependencies(dependent, head) {
            if counted(candidate) {
                continue;
            }
            let Constraint::Dependency { label, weight, .. } = facts.get(candidate) else {
                continue;
            };

            let mut score = *weight;
            let mut consumed: SmallVec<[FactId; 4]> = SmallVec::new();
            consumed.push(candidate);

            for &id in self.index.incoming(relation_token) {
                if counted(id) {
                    continue;
                }
                let fact = facts.get(id);
                if fact.label() == Some(label.as_str()) {
                    score += fact.weight();
                    consumed.push(id);
                }
            }

            for &id in self.index.directions(dependent) {
                if counted(id) {
                    continue;
                }
                if let Constraint::Direction {
                    direction, weight, ..
                } = facts.get(id)
                {
                    if *direction == expected {
                        score += weight;
                        consumed.push(id);
                    }
                }
            }

            if score > best.score {
                consumed.sort_unstable();
                best = EdgeScore {
                    score,
                    label: label.clone(),
                    consumed,
                };
            }
        }

        best
    }
}
