//! Score analysis for parsed trees.
//!
//! Explains a tree score arc by arc: which facts each arc of the winning
//! tree consumed and how much it contributed. Every fact is attributed to at
//! most one arc, so the arc scores add up to the tree score.

use std::fmt;

use depforge_core::{FactId, FactSet, TokenIndex, ROOT};

use crate::edge::EdgeScore;

/// Contribution of one arc of a parsed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcAnalysis {
    pub dependent: TokenIndex,
    pub head: TokenIndex,
    pub label: String,
    /// Score contributed by the arc.
    pub score: f64,
    /// Facts attributed to the arc, ascending by id.
    pub facts: Vec<FactId>,
    /// The arc scored the unsupported floor.
    pub unsupported: bool,
}

impl ArcAnalysis {
    /// Returns true for a non-root arc no dependency fact backs.
    ///
    /// Root arcs without facts score 0 and are not counted.
    pub fn is_unsupported(&self) -> bool {
        self.unsupported
    }
}

/// Per-arc breakdown of a tree score.
///
/// # Example
///
/// ```
/// use depforge_config::RelationSlot;
/// use depforge_core::{Constraint, FactSet};
/// use depforge_scoring::{EdgeScorer, SatisfiedSet, TreeAnalysis};
///
/// let facts = FactSet::from_facts(2, [
///     Constraint::dependency(1, 0, "ROOT", 1.0),
///     Constraint::dependency(2, 1, "obj", 0.5),
/// ]).unwrap();
/// let scorer = EdgeScorer::new(&facts, RelationSlot::Head);
/// let empty = SatisfiedSet::new();
///
/// let mut builder = TreeAnalysis::builder(&facts);
/// builder.record(1, 0, &scorer.score_edge(0, 1, &empty, &empty));
/// builder.record(2, 1, &scorer.score_edge(1, 2, &empty, &empty));
/// let analysis = builder.build();
///
/// assert_eq!(analysis.total(), 1.5);
/// assert_eq!(analysis.arc_for(2).unwrap().label, "obj");
/// assert!(analysis.unused_facts(&facts).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeAnalysis {
    arcs: Vec<ArcAnalysis>,
    total: f64,
}

impl TreeAnalysis {
    /// Starts an analysis over `facts`.
    pub fn builder(facts: &FactSet) -> AnalysisBuilder<'_> {
        AnalysisBuilder {
            facts,
            attributed: vec![false; facts.len()],
            arcs: Vec::new(),
        }
    }

    /// Returns the arcs in dependent order.
    pub fn arcs(&self) -> &[ArcAnalysis] {
        &self.arcs
    }

    /// Returns the sum of the arc scores.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Returns the arc of `dependent`, if the tree attached it.
    pub fn arc_for(&self, dependent: TokenIndex) -> Option<&ArcAnalysis> {
        self.arcs
            .binary_search_by_key(&dependent, |arc| arc.dependent)
            .ok()
            .map(|position| &self.arcs[position])
    }

    /// Returns every fact consumed by the tree, ascending by id.
    pub fn consumed_facts(&self) -> Vec<FactId> {
        let mut ids: Vec<FactId> = self
            .arcs
            .iter()
            .flat_map(|arc| arc.facts.iter().copied())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the facts of `facts` the tree left unused, ascending by id.
    pub fn unused_facts(&self, facts: &FactSet) -> Vec<FactId> {
        let consumed = self.consumed_facts();
        facts
            .iter()
            .map(|(id, _)| id)
            .filter(|id| consumed.binary_search(id).is_err())
            .collect()
    }

    /// Returns the summed weight of all consumed facts.
    pub fn attributed_weight(&self, facts: &FactSet) -> f64 {
        self.consumed_facts()
            .into_iter()
            .map(|id| facts.weight(id))
            .sum()
    }

    /// Returns the number of arcs scored at the unsupported floor.
    pub fn unsupported_count(&self) -> usize {
        self.arcs.iter().filter(|arc| arc.is_unsupported()).count()
    }
}

impl fmt::Display for TreeAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total {:.4}", self.total)?;
        for arc in &self.arcs {
            write!(
                f,
                "  {} <- {} {:<10} {:>8.4}",
                arc.dependent, arc.head, arc.label, arc.score
            )?;
            let ids: Vec<String> = arc.facts.iter().map(ToString::to_string).collect();
            writeln!(f, " [{}]", ids.join(", "))?;
        }
        Ok(())
    }
}

/// Collects arcs in backtrace order and attributes their facts first-come.
#[derive(Debug)]
pub struct AnalysisBuilder<'a> {
    facts: &'a FactSet,
    attributed: Vec<bool>,
    arcs: Vec<ArcAnalysis>,
}

impl AnalysisBuilder<'_> {
    /// Records the arc `head -> dependent` with the edge score it was built
    /// with.
    ///
    /// Facts already attributed to an earlier arc stay there; their weight is
    /// taken off this arc's score.
    pub fn record(&mut self, dependent: TokenIndex, head: TokenIndex, edge: &EdgeScore) {
        let mut score = edge.score;
        let mut facts = Vec::with_capacity(edge.consumed.len());
        for &id in &edge.consumed {
            if self.attributed[id.index()] {
                score -= self.facts.weight(id);
            } else {
                self.attributed[id.index()] = true;
                facts.push(id);
            }
        }
        self.arcs.push(ArcAnalysis {
            dependent,
            head,
            label: edge.label.clone(),
            score,
            facts,
            unsupported: head != ROOT && !edge.is_supported(),
        });
    }

    /// Finishes the analysis.
    pub fn build(mut self) -> TreeAnalysis {
        self.arcs.sort_by_key(|arc| arc.dependent);
        let total: f64 = self.arcs.iter().map(|arc| arc.score).sum();
        TreeAnalysis {
            arcs: self.arcs,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depforge_core::Constraint;
    use smallvec::smallvec;

    fn shared_facts() -> FactSet {
        FactSet::from_facts(
            3,
            [
                Constraint::dependency(1, 2, "dep", 0.5),
                Constraint::dependency(3, 2, "dep", 0.5),
                Constraint::incoming_relation(2, "dep", 2.0),
                Constraint::dependency(2, 0, "ROOT", 1.0),
            ],
        )
        .unwrap()
    }

    fn edge(score: f64, label: &str, ids: &[u32]) -> EdgeScore {
        EdgeScore {
            score,
            label: label.to_string(),
            consumed: ids.iter().map(|&i| FactId::new(i)).collect(),
        }
    }

    #[test]
    fn test_shared_fact_attributed_once() {
        let facts = shared_facts();
        let mut builder = TreeAnalysis::builder(&facts);
        builder.record(3, 2, &edge(2.5, "dep", &[1, 2]));
        builder.record(1, 2, &edge(2.5, "dep", &[0, 2]));
        builder.record(2, 0, &edge(1.0, "ROOT", &[3]));
        let analysis = builder.build();

        assert_eq!(analysis.arc_for(3).unwrap().facts, vec![FactId::new(1), FactId::new(2)]);
        assert_eq!(analysis.arc_for(1).unwrap().facts, vec![FactId::new(0)]);
        assert_eq!(analysis.arc_for(1).unwrap().score, 0.5);
        assert_eq!(analysis.total(), 4.0);
        assert_eq!(analysis.attributed_weight(&facts), 4.0);
    }

    #[test]
    fn test_arcs_sorted_by_dependent() {
        let facts = shared_facts();
        let mut builder = TreeAnalysis::builder(&facts);
        builder.record(2, 0, &edge(1.0, "ROOT", &[3]));
        builder.record(3, 1, &EdgeScore::unsupported());
        builder.record(1, 2, &edge(0.5, "dep", &[0]));
        let analysis = builder.build();

        let dependents: Vec<_> = analysis.arcs().iter().map(|a| a.dependent).collect();
        assert_eq!(dependents, vec![1, 2, 3]);
        assert!(analysis.arc_for(3).unwrap().is_unsupported());
        assert_eq!(analysis.unsupported_count(), 1);
        assert_eq!(analysis.unused_facts(&facts), vec![FactId::new(1), FactId::new(2)]);
        assert_eq!(analysis.total(), 1.0);
    }

    #[test]
    fn test_bare_root_arc_is_supported() {
        let facts = shared_facts();
        let mut builder = TreeAnalysis::builder(&facts);
        builder.record(1, 0, &edge(0.0, "ROOT", &[]));
        builder.record(3, 2, &EdgeScore::unsupported());
        let analysis = builder.build();

        let root_arc = analysis.arc_for(1).unwrap();
        assert!(root_arc.facts.is_empty());
        assert!(!root_arc.is_unsupported());
        assert!(analysis.arc_for(3).unwrap().is_unsupported());
        assert_eq!(analysis.unsupported_count(), 1);
    }

    #[test]
    fn test_display() {
        let facts = shared_facts();
        let mut builder = TreeAnalysis::builder(&facts);
        let scored = EdgeScore {
            score: 1.0,
            label: "ROOT".to_string(),
            consumed: smallvec![FactId::new(3)],
        };
        builder.record(2, 0, &scored);
        let text = builder.build().to_string();
        assert!(text.starts_with("total 1.0000\n"));
        assert!(text.contains("2 <- 0 ROOT"));
        assert!(text.contains("[#3]"));
    }
}
