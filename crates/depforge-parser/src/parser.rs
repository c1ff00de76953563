//! The Eisner recurrence.

use std::time::Instant;

use depforge_config::{ParserConfig, RelationSlot};
use depforge_core::FactSet;
use depforge_scoring::{EdgeScore, EdgeScorer, SatisfiedSet};
use tracing::debug;

use crate::backtrace::backtrace;
use crate::chart::{Cell, CellKind, Chart};
use crate::outcome::ParseOutcome;

/// Projective chart parser over weighted facts.
///
/// Pure and deterministic: the same fact set always yields the same tree.
/// The parser holds no per-parse state and can be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartParser {
    relation_slot: RelationSlot,
}

impl ChartParser {
    /// Creates a parser consulting incoming-relation facts of `relation_slot`.
    pub fn new(relation_slot: RelationSlot) -> Self {
        Self { relation_slot }
    }

    /// Creates a parser from a validated configuration.
    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new(config.relation_slot)
    }

    /// Returns the relation slot.
    pub fn relation_slot(&self) -> RelationSlot {
        self.relation_slot
    }

    /// Parses one sentence.
    ///
    /// Never fails: any fact set, including an empty one, yields a tree over
    /// all `facts.sentence_length()` tokens.
    pub fn parse(&self, facts: &FactSet) -> ParseOutcome {
        let start = Instant::now();
        let tokens = facts.sentence_length();
        debug!(event = "parse_start", tokens, facts = facts.len());

        let chart = self.chart(facts);
        let (tree, analysis) = backtrace(&chart, facts);
        let score = chart.root().score;

        debug!(
            event = "parse_end",
            tokens,
            facts = facts.len(),
            score,
            unsupported = analysis.unsupported_count(),
            duration_us = start.elapsed().as_micros() as u64,
        );
        ParseOutcome {
            tree,
            score,
            analysis,
        }
    }

    /// Fills and returns the chart of one sentence.
    pub fn chart(&self, facts: &FactSet) -> Chart {
        let n = facts.sentence_length();
        let scorer = EdgeScorer::new(facts, self.relation_slot);
        let mut chart = Chart::new(n);

        for k in 1..=n {
            for s in 0..=n - k {
                let t = s + k;
                fill_incomplete(&mut chart, &scorer, s, t, CellKind::LeftIncomplete);
                fill_incomplete(&mut chart, &scorer, s, t, CellKind::RightIncomplete);
                fill_complete(&mut chart, facts, s, t, CellKind::LeftComplete);
                fill_complete(&mut chart, facts, s, t, CellKind::RightComplete);
            }
        }
        chart
    }
}

// Two children combine by summing their scores and taking off the weight of
// the facts both of them count.
fn combined(left: &Cell, right: &Cell, facts: &FactSet) -> f64 {
    left.score + right.score - left.satisfied.overlap_weight(&right.satisfied, facts)
}

// l_false[s][t] (arc t -> s) or r_false[s][t] (arc s -> t), over splits
// r in [s, t) of r_true[s][r] + l_true[r+1][t].
fn fill_incomplete(chart: &mut Chart, scorer: &EdgeScorer<'_>, s: usize, t: usize, kind: CellKind) {
    let (head, dependent) = match kind {
        CellKind::LeftIncomplete => (t, s),
        _ => (s, t),
    };
    let facts = scorer.facts();

    let mut best: Option<(f64, usize, EdgeScore)> = None;
    for r in s..t {
        let left = chart.get(CellKind::RightComplete, s, r);
        let right = chart.get(CellKind::LeftComplete, r + 1, t);
        let edge = scorer.score_edge(head, dependent, &left.satisfied, &right.satisfied);
        let score = combined(left, right, facts) + edge.score;
        let better = match &best {
            Some((best_score, _, _)) => score > *best_score,
            None => true,
        };
        if better {
            best = Some((score, r, edge));
        }
    }

    if let Some((score, r, edge)) = best {
        let left = chart.get(CellKind::RightComplete, s, r);
        let right = chart.get(CellKind::LeftComplete, r + 1, t);
        let satisfied = left.satisfied.union(&right.satisfied, &edge.consumed);
        chart.set(
            kind,
            s,
            t,
            Cell {
                score,
                split: Some(r),
                satisfied,
                edge: Some(edge),
            },
        );
    }
}

// l_true[s][t] over r in [s, t) of l_true[s][r] + l_false[r][t], or
// r_true[s][t] over r in [s+1, t] of r_false[s][r] + r_true[r][t].
fn fill_complete(chart: &mut Chart, facts: &FactSet, s: usize, t: usize, kind: CellKind) {
    let children = |r: usize| match kind {
        CellKind::LeftComplete => (
            (CellKind::LeftComplete, s, r),
            (CellKind::LeftIncomplete, r, t),
        ),
        _ => (
            (CellKind::RightIncomplete, s, r),
            (CellKind::RightComplete, r, t),
        ),
    };
    let splits = match kind {
        CellKind::LeftComplete => s..t,
        _ => s + 1..t + 1,
    };

    let mut best: Option<(f64, usize)> = None;
    for r in splits {
        let ((lk, ls, lt), (rk, rs, rt)) = children(r);
        let score = combined(chart.get(lk, ls, lt), chart.get(rk, rs, rt), facts);
        let better = match best {
            Some((best_score, _)) => score > best_score,
            None => true,
        };
        if better {
            best = Some((score, r));
        }
    }

    if let Some((score, r)) = best {
        let ((lk, ls, lt), (rk, rs, rt)) = children(r);
        let satisfied: SatisfiedSet = chart
            .get(lk, ls, lt)
            .satisfied
            .union(&chart.get(rk, rs, rt).satisfied, &[]);
        chart.set(
            kind,
            s,
            t,
            Cell {
                score,
                split: Some(r),
                satisfied,
                edge: None,
            },
        );
    }
}
