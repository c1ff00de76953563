//! Constraint builder.
//!
//! Converts the edge, direction and role classifier streams of one sentence
//! into weighted facts. Results are attributed to tokens by position only,
//! following [`InstanceLayout`]; each stream must hold exactly as many
//! results as the layout has instances.

use depforge_config::ParserConfig;
use depforge_core::{Constraint, ConstraintKind, Direction, FactError, FactSet, Prediction};
use tracing::debug;

use crate::error::{BuildError, Stream};
use crate::layout::{EdgeInstance, InstanceLayout};

/// Separator of alternative relation names in role labels.
const ALTERNATIVE_SEPARATOR: char = '|';

/// Builds the fact set of a sentence from classifier results.
///
/// # Example
///
/// ```
/// use depforge_constraints::ConstraintBuilder;
/// use depforge_core::Prediction;
///
/// let builder = ConstraintBuilder::new(20, "__");
/// let edges = vec![
///     Prediction::new("ROOT", 0.9),  // 1 -> root
///     Prediction::new("__", 0.8),    // 2 -> root
///     Prediction::new("__", 0.7),    // 1 -> 2
///     Prediction::new("obj", 0.6),   // 2 -> 1
/// ];
/// let directions = vec![
///     Prediction::new("ROOT", 1.0).with_distribution([("ROOT", 1.0)]),
///     Prediction::new("LEFT", 1.0).with_distribution([("LEFT", 1.0)]),
/// ];
/// let roles = vec![
///     Prediction::new("__", 1.0),
///     Prediction::new("obj", 0.9).with_distribution([("obj", 0.9)]),
/// ];
///
/// let facts = builder.build(2, &edges, &directions, &roles).unwrap();
/// // two dependency, two direction and one incoming-relation fact
/// assert_eq!(facts.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintBuilder {
    max_span: usize,
    null_label: String,
}

impl ConstraintBuilder {
    /// Creates a builder for the given window and null marker.
    ///
    /// The window is expected to be validated by the configuration layer.
    pub fn new(max_span: usize, null_label: impl Into<String>) -> Self {
        Self {
            max_span,
            null_label: null_label.into(),
        }
    }

    /// Creates a builder from a validated configuration.
    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new(config.max_span, config.null_label.clone())
    }

    /// Returns the candidate window.
    pub fn max_span(&self) -> usize {
        self.max_span
    }

    /// Returns the null marker.
    pub fn null_label(&self) -> &str {
        &self.null_label
    }

    /// Returns the instance layout the streams of a sentence must follow.
    pub fn layout(&self, sentence_length: usize) -> InstanceLayout {
        InstanceLayout::new(sentence_length, self.max_span)
    }

    /// Builds the facts of a sentence of `sentence_length` tokens.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] for an empty sentence, a stream of the wrong
    /// length, an unknown direction label or an invalid weight.
    pub fn build(
        &self,
        sentence_length: usize,
        edges: &[Prediction],
        directions: &[Prediction],
        roles: &[Prediction],
    ) -> Result<FactSet, BuildError> {
        if sentence_length == 0 {
            return Err(BuildError::EmptySentence);
        }
        let layout = self.layout(sentence_length);
        check_length(Stream::Edge, layout.edge_count(), edges.len())?;
        check_length(Stream::Direction, layout.token_count(), directions.len())?;
        check_length(Stream::Role, layout.token_count(), roles.len())?;

        let mut facts = FactSet::new(sentence_length);
        self.add_edge_facts(&mut facts, &layout, edges)?;
        add_direction_facts(&mut facts, &layout, directions)?;
        self.add_role_facts(&mut facts, &layout, roles)?;

        debug!(
            event = "constraints_built",
            tokens = sentence_length,
            max_span = self.max_span,
            dependency = facts.count_of(ConstraintKind::Dependency),
            direction = facts.count_of(ConstraintKind::Direction),
            incoming_relation = facts.count_of(ConstraintKind::IncomingRelation),
        );
        Ok(facts)
    }

    fn add_edge_facts(
        &self,
        facts: &mut FactSet,
        layout: &InstanceLayout,
        edges: &[Prediction],
    ) -> Result<(), BuildError> {
        for (position, (instance, prediction)) in layout.edge_instances().zip(edges).enumerate() {
            if prediction.is_null(&self.null_label) {
                continue;
            }
            let fact = match instance {
                EdgeInstance::Root { dependent } => Constraint::dependency(
                    dependent,
                    depforge_core::ROOT,
                    prediction.label.as_str(),
                    prediction.confidence,
                ),
                EdgeInstance::Pair { dependent, head } => Constraint::dependency(
                    dependent,
                    head,
                    prediction.label.as_str(),
                    prediction.confidence,
                ),
            };
            push(facts, Stream::Edge, position, fact)?;
        }
        Ok(())
    }

    fn add_role_facts(
        &self,
        facts: &mut FactSet,
        layout: &InstanceLayout,
        roles: &[Prediction],
    ) -> Result<(), BuildError> {
        for (position, (token, prediction)) in layout.token_instances().zip(roles).enumerate() {
            if prediction.is_null(&self.null_label) {
                continue;
            }
            for (label, weight) in split_alternatives(prediction) {
                push(
                    facts,
                    Stream::Role,
                    position,
                    Constraint::incoming_relation(token, label, weight),
                )?;
            }
        }
        Ok(())
    }
}

fn add_direction_facts(
    facts: &mut FactSet,
    layout: &InstanceLayout,
    directions: &[Prediction],
) -> Result<(), BuildError> {
    for (position, (token, prediction)) in layout.token_instances().zip(directions).enumerate() {
        for (label, weight) in &prediction.distribution {
            if *weight == 0.0 {
                continue;
            }
            let direction: Direction = label.parse().map_err(|source| BuildError::Fact {
                stream: Stream::Direction,
                position,
                source,
            })?;
            push(
                facts,
                Stream::Direction,
                position,
                Constraint::direction(token, direction, *weight),
            )?;
        }
    }
    Ok(())
}

/// Splits a possibly ambiguous role prediction into its sub-labels, each
/// weighted by the summed distribution weight of every entry naming it.
///
/// Sub-labels keep the order of the predicted label; repeats are merged.
fn split_alternatives(prediction: &Prediction) -> Vec<(&str, f64)> {
    let mut labels: Vec<&str> = Vec::new();
    for label in prediction.label.split(ALTERNATIVE_SEPARATOR) {
        if !label.is_empty() && !labels.contains(&label) {
            labels.push(label);
        }
    }

    labels
        .into_iter()
        .map(|label| {
            let weight = prediction
                .distribution
                .iter()
                .filter(|(entry, _)| entry.split(ALTERNATIVE_SEPARATOR).any(|l| l == label))
                .map(|(_, weight)| *weight)
                .sum();
            (label, weight)
        })
        .collect()
}

fn check_length(stream: Stream, expected: usize, actual: usize) -> Result<(), BuildError> {
    if expected != actual {
        return Err(BuildError::StreamLength {
            stream,
            expected,
            actual,
        });
    }
    Ok(())
}

fn push(
    facts: &mut FactSet,
    stream: Stream,
    position: usize,
    fact: Constraint,
) -> Result<(), BuildError> {
    facts
        .push(fact)
        .map(|_| ())
        .map_err(|source: FactError| BuildError::Fact {
            stream,
            position,
            source,
        })
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
