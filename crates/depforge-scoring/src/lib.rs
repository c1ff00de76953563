//! Edge scoring for depforge.
//!
//! This crate provides the pieces the chart parser scores arcs with:
//! - [`FactIndex`] - O(1) fact lookup by token and token pair
//! - [`SatisfiedSet`] - the facts already counted toward a chart cell
//! - [`EdgeScorer`] - scores one candidate arc against the unconsumed facts
//! - [`TreeAnalysis`] - per-arc attribution of the winning tree score

pub mod analysis;
pub mod edge;
pub mod index;
pub mod satisfied;

pub use analysis::{AnalysisBuilder, ArcAnalysis, TreeAnalysis};
pub use edge::{EdgeScore, EdgeScorer, UNSUPPORTED_EDGE_SCORE};
pub use index::FactIndex;
pub use satisfied::SatisfiedSet;
