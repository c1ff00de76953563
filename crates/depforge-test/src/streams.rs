//! Classifier-result streams scripted from a gold tree.
//!
//! Stand-ins for the three external classifiers: every stream answers in
//! [`InstanceLayout`] order and agrees with a known tree, so a parse of the
//! built facts must reproduce that tree.

use depforge_constraints::{EdgeInstance, InstanceLayout};
use depforge_core::{Direction, Prediction, TokenIndex};

/// The edge, direction and role streams of one sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierStreams {
    pub edges: Vec<Prediction>,
    pub directions: Vec<Prediction>,
    pub roles: Vec<Prediction>,
}

impl ClassifierStreams {
    /// Scripts streams for the gold tree `gold`, where `gold[i]` is the
    /// `(head, label)` of token `i + 1`.
    ///
    /// Edge instances matching a gold arc answer its label with confidence
    /// 0.9, all others the null marker. Root tokens get the `ROOT` direction
    /// and a null role.
    ///
    /// # Example
    ///
    /// ```
    /// use depforge_test::ClassifierStreams;
    ///
    /// let streams = ClassifierStreams::from_tree(&[(0, "ROOT"), (1, "obj")], 20, "__");
    /// assert_eq!(streams.edges.len(), 4);
    /// assert_eq!(streams.edges[0].label, "ROOT");
    /// assert_eq!(streams.roles[1].label, "obj");
    /// ```
    pub fn from_tree(gold: &[(TokenIndex, &str)], max_span: usize, null_label: &str) -> Self {
        let layout = InstanceLayout::new(gold.len(), max_span);
        let edges = layout
            .edge_instances()
            .map(|instance| {
                let (head, label) = gold[instance.dependent() - 1];
                match instance {
                    EdgeInstance::Root { .. } if head == 0 => Prediction::new(label, 0.9),
                    EdgeInstance::Pair { head: h, .. } if h == head => {
                        Prediction::new(label, 0.9)
                    }
                    _ => Prediction::new(null_label, 0.8),
                }
            })
            .collect();

        let directions = layout
            .token_instances()
            .map(|token| {
                let direction = Direction::between(gold[token - 1].0, token);
                Prediction::new(direction.as_str(), 0.7)
                    .with_distribution([(direction.as_str(), 0.7)])
            })
            .collect();

        let roles = layout
            .token_instances()
            .map(|token| match gold[token - 1] {
                (0, _) => Prediction::new(null_label, 0.6),
                (_, label) => Prediction::new(label, 0.6).with_distribution([(label, 0.6)]),
            })
            .collect();

        Self {
            edges,
            directions,
            roles,
        }
    }

    /// Streams of the right lengths in which every classifier abstains.
    pub fn abstaining(sentence_length: usize, max_span: usize, null_label: &str) -> Self {
        let layout = InstanceLayout::new(sentence_length, max_span);
        let null = || Prediction::new(null_label, 1.0);
        Self {
            edges: (0..layout.edge_count()).map(|_| null()).collect(),
            directions: (0..layout.token_count()).map(|_| null()).collect(),
            roles: (0..layout.token_count()).map(|_| null()).collect(),
        }
    }
}
