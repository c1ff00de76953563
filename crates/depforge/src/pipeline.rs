//! Per-sentence parsing pipeline.
//!
//! Runs the three classifiers over the instances of a sentence, builds the
//! fact set from their answers and hands it to the chart parser.

use std::time::Instant;

use depforge_config::{ConfigError, ParserConfig};
use depforge_constraints::{ConstraintBuilder, EdgeInstance, Stream};
use depforge_core::{Prediction, TokenIndex};
use depforge_parser::{ChartParser, ParseOutcome};
use tracing::debug;

use crate::classifier::{Classifier, ClassifierResult};
use crate::error::ParseError;
use crate::sentence::Sentence;
use crate::statistics::{ParseStatistics, StatisticsCollector};

/// Parses sentences with three external classifiers.
///
/// Type parameters:
/// - `E` - edge classifier over [`EdgeInstance`]s
/// - `D` - direction classifier over token indices
/// - `R` - role classifier over token indices
///
/// The parser holds no per-sentence state, so one instance may parse many
/// sentences concurrently.
///
/// # Example
///
/// ```
/// use depforge::{ClassifierResult, DependencyParser, ParserConfig, Sentence};
/// use depforge_constraints::EdgeInstance;
/// use depforge_core::{Prediction, TokenIndex};
///
/// // Token 1 heads the sentence, every later token attaches to its left
/// // neighbour.
/// let edges = |_: &Sentence, instances: &[EdgeInstance]| -> ClassifierResult {
///     Ok(instances
///         .iter()
///         .map(|instance| match *instance {
///             EdgeInstance::Root { dependent: 1 } => Prediction::new("ROOT", 1.0),
///             EdgeInstance::Pair { dependent, head } if head + 1 == dependent => {
///                 Prediction::new("next", 1.0)
///             }
///             _ => Prediction::new("__", 1.0),
///         })
///         .collect())
/// };
/// let abstain = |_: &Sentence, tokens: &[TokenIndex]| -> ClassifierResult {
///     Ok(tokens.iter().map(|_| Prediction::new("__", 1.0)).collect())
/// };
///
/// let parser = DependencyParser::new(ParserConfig::default(), edges, abstain, abstain).unwrap();
/// let outcome = parser.parse(&Sentence::from_forms(["a", "b", "c"])).unwrap();
/// assert_eq!(outcome.tree.heads(), vec![0, 1, 2]);
/// ```
pub struct DependencyParser<E, D, R> {
    config: ParserConfig,
    builder: ConstraintBuilder,
    parser: ChartParser,
    edge_classifier: E,
    direction_classifier: D,
    role_classifier: R,
    statistics: StatisticsCollector,
}

impl<E, D, R> DependencyParser<E, D, R>
where
    E: Classifier<EdgeInstance>,
    D: Classifier<TokenIndex>,
    R: Classifier<TokenIndex>,
{
    /// Creates a parser from a configuration and three classifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration does not validate, such as
    /// a `max_span` above the ceiling.
    pub fn new(config: ParserConfig, edges: E, directions: D, roles: R) -> Result<Self, ConfigError> {
        config.validate()?;

        #[cfg(feature = "console")]
        depforge_console::init();

        Ok(Self {
            builder: ConstraintBuilder::from_config(&config),
            parser: ChartParser::from_config(&config),
            config,
            edge_classifier: edges,
            direction_classifier: directions,
            role_classifier: roles,
            statistics: StatisticsCollector::new(),
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the work done by this parser so far.
    pub fn statistics(&self) -> ParseStatistics {
        self.statistics.snapshot()
    }

    /// Clears the collected statistics.
    pub fn reset_statistics(&self) {
        self.statistics.reset();
    }

    /// Parses one sentence.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for an empty sentence, a failing classifier, or
    /// classifier answers that do not fit the instance layout.
    pub fn parse(&self, sentence: &Sentence) -> Result<ParseOutcome, ParseError> {
        let result = self.parse_inner(sentence);
        if result.is_err() {
            self.statistics.record_failed();
        }
        result
    }

    fn parse_inner(&self, sentence: &Sentence) -> Result<ParseOutcome, ParseError> {
        if sentence.is_empty() {
            return Err(ParseError::EmptySentence);
        }
        let start = Instant::now();
        let n = sentence.len();
        let layout = self.builder.layout(n);
        let edge_instances: Vec<EdgeInstance> = layout.edge_instances().collect();
        let token_instances: Vec<TokenIndex> = layout.token_instances().collect();

        debug!(
            event = "classify_start",
            tokens = n,
            edge_instances = edge_instances.len(),
            parallel = self.config.parallel_classifiers,
        );

        let (edges, directions, roles) = self.classify(sentence, &edge_instances, &token_instances);
        let edges = stream_result(Stream::Edge, edges)?;
        let directions = stream_result(Stream::Direction, directions)?;
        let roles = stream_result(Stream::Role, roles)?;

        let facts = self.builder.build(n, &edges, &directions, &roles)?;
        let outcome = self.parser.parse(&facts);
        let unsupported = outcome.analysis.unsupported_count();

        let duration = start.elapsed();
        self.statistics
            .record_parsed(n, facts.len(), unsupported, duration);

        debug!(
            event = "sentence_parsed",
            tokens = n,
            facts = facts.len(),
            score = outcome.score,
            unsupported = unsupported,
            duration_us = duration.as_micros() as u64,
        );
        Ok(outcome)
    }

    fn classify(
        &self,
        sentence: &Sentence,
        edge_instances: &[EdgeInstance],
        token_instances: &[TokenIndex],
    ) -> (ClassifierResult, ClassifierResult, ClassifierResult) {
        let edges = || self.edge_classifier.classify(sentence, edge_instances);
        let directions = || self.direction_classifier.classify(sentence, token_instances);
        let roles = || self.role_classifier.classify(sentence, token_instances);

        if self.config.parallel_classifiers {
            let (edges, (directions, roles)) =
                rayon::join(edges, || rayon::join(directions, roles));
            (edges, directions, roles)
        } else {
            (edges(), directions(), roles())
        }
    }
}

fn stream_result(stream: Stream, result: ClassifierResult) -> Result<Vec<Prediction>, ParseError> {
    result.map_err(|source| ParseError::Classifier { stream, source })
}

impl<E, D, R> std::fmt::Debug for DependencyParser<E, D, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyParser")
            .field("config", &self.config)
            .field("statistics", &self.statistics)
            .finish_non_exhaustive()
    }
}
