//! depforge - constraint-weighted projective dependency parsing.
//!
//! Three external classifiers answer questions about a sentence: where each
//! token attaches, in which direction its head lies and which relation it
//! receives. Their answers become weighted facts, and an Eisner chart parser
//! finds the projective tree that satisfies the most fact weight, counting
//! every fact at most once.
//!
//! # Quick Start
//!
//! ```
//! use depforge::prelude::*;
//!
//! let edges = |_: &Sentence, instances: &[EdgeInstance]| -> ClassifierResult {
//!     Ok(instances
//!         .iter()
//!         .map(|instance| match *instance {
//!             EdgeInstance::Root { dependent: 2 } => Prediction::new("ROOT", 0.9),
//!             EdgeInstance::Pair { dependent: 1, head: 2 } => Prediction::new("nsubj", 0.8),
//!             _ => Prediction::new("__", 0.9),
//!         })
//!         .collect())
//! };
//! let directions = |_: &Sentence, tokens: &[TokenIndex]| -> ClassifierResult {
//!     Ok(tokens
//!         .iter()
//!         .map(|&token| {
//!             let label = if token == 2 { "ROOT" } else { "RIGHT" };
//!             Prediction::new(label, 0.7).with_distribution([(label, 0.7)])
//!         })
//!         .collect())
//! };
//! let roles = |_: &Sentence, tokens: &[TokenIndex]| -> ClassifierResult {
//!     Ok(tokens.iter().map(|_| Prediction::new("__", 1.0)).collect())
//! };
//!
//! let parser = DependencyParser::new(ParserConfig::default(), edges, directions, roles).unwrap();
//! let outcome = parser.parse(&Sentence::from_forms(["Dogs", "bark"])).unwrap();
//!
//! assert_eq!(outcome.tree.heads(), vec![2, 0]);
//! assert_eq!(outcome.tree.get(1).unwrap().label, "nsubj");
//! ```
//!
//! # Crates
//!
//! - `depforge-core` - facts, predictions and trees
//! - `depforge-config` - TOML/YAML parser configuration
//! - `depforge-constraints` - instance layout and fact construction
//! - `depforge-scoring` - edge scoring and tree analysis
//! - `depforge-parser` - the chart parser

pub mod batch;
pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod sentence;
pub mod statistics;

pub use batch::{BatchSummary, SentenceResult};
pub use classifier::{Classifier, ClassifierResult};
pub use error::{ClassifierError, ParseError};
pub use pipeline::DependencyParser;
pub use sentence::{Sentence, Token};
pub use statistics::{ParseStatistics, StatisticsCollector};

pub use depforge_config::{ConfigError, ParserConfig, RelationSlot, ThreadCount};
pub use depforge_constraints::{BuildError, ConstraintBuilder, EdgeInstance, InstanceLayout, Stream};
pub use depforge_core::{
    Attachment, Constraint, ConstraintKind, DependencyTree, Direction, FactId, FactSet,
    Prediction, TokenIndex, ROOT, ROOT_LABEL,
};
pub use depforge_parser::{ChartParser, ParseOutcome};
pub use depforge_scoring::{ArcAnalysis, TreeAnalysis};

#[cfg(feature = "console")]
pub use depforge_console as console;

/// Common imports for classifier integrations.
pub mod prelude {
    pub use crate::{
        Classifier, ClassifierError, ClassifierResult, DependencyParser, EdgeInstance,
        ParseError, ParseOutcome, ParserConfig, Prediction, Sentence, TokenIndex,
    };
}
