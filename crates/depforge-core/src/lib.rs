//! depforge Core - Core types for constraint-weighted dependency parsing
//!
//! This crate provides the fundamental abstractions for depforge:
//! - Weighted structural facts (`Constraint`) and the per-sentence `FactSet`
//! - Classifier outputs (`Prediction`)
//! - Parse results (`Attachment`, `DependencyTree`)

pub mod constraint;
pub mod error;
pub mod fact_set;
pub mod prediction;
pub mod tree;


pub use constraint::{Constraint, ConstraintKind, Direction, FactId};
pub use error::FactError;
pub use fact_set::FactSet;
pub use prediction::Prediction;
pub use tree::{Attachment, DependencyTree, Edge};

/// Index of a sentence token. Tokens are numbered `1..=N`.
pub type TokenIndex = usize;

/// The virtual root every top-level token attaches to.
pub const ROOT: TokenIndex = 0;

/// Relation label used for root attachments without a labelled root fact.
pub const ROOT_LABEL: &str = "ROOT";
