//! Tree recovery from a filled chart.

use depforge_core::{Attachment, DependencyTree, FactSet, ROOT};
use depforge_scoring::TreeAnalysis;
use tracing::trace;

use crate::chart::{CellKind, Chart};

/// Walks the best derivation from `r_true[0][N]` with an explicit stack and
/// collects the arcs it passes.
///
/// Tokens the derivation never attaches keep the unattached sentinel.
pub(crate) fn backtrace(chart: &Chart, facts: &FactSet) -> (DependencyTree, TreeAnalysis) {
    let n = chart.sentence_length();
    let mut attachments = vec![Attachment::unattached(); n];
    let mut analysis = TreeAnalysis::builder(facts);
    let mut stack = vec![(CellKind::RightComplete, 0, n)];

    while let Some((kind, s, t)) = stack.pop() {
        let cell = chart.get(kind, s, t);
        let Some(r) = cell.split else {
            continue;
        };

        // Left child is pushed last so it is expanded first.
        match kind {
            CellKind::LeftComplete => {
                stack.push((CellKind::LeftIncomplete, r, t));
                stack.push((CellKind::LeftComplete, s, r));
            }
            CellKind::RightComplete => {
                stack.push((CellKind::RightComplete, r, t));
                stack.push((CellKind::RightIncomplete, s, r));
            }
            CellKind::LeftIncomplete | CellKind::RightIncomplete => {
                let (head, dependent) = if kind == CellKind::LeftIncomplete {
                    (t, s)
                } else {
                    (s, t)
                };
                if dependent != ROOT {
                    if let Some(edge) = &cell.edge {
                        trace!(
                            event = "arc",
                            dependent,
                            head,
                            label = %edge.label,
                            score = edge.score,
                        );
                        attachments[dependent - 1] = Attachment::new(head, edge.label.as_str());
                        analysis.record(dependent, head, edge);
                    }
                }
                stack.push((CellKind::LeftComplete, r + 1, t));
                stack.push((CellKind::RightComplete, s, r));
            }
        }
    }

    (DependencyTree::new(attachments), analysis.build())
}
