//! Chart parser for depforge.
//!
//! Finds one best-scoring projective dependency tree for a sentence given its
//! weighted facts, using an Eisner-style dynamic program over span
//! boundaries. Every fact is counted at most once in the score of a tree.
//!
//! # Example
//!
//! ```
//! use depforge_core::{Constraint, Direction, FactSet};
//! use depforge_parser::ChartParser;
//!
//! let facts = FactSet::from_facts(2, [
//!     Constraint::dependency(1, 0, "ROOT", 1.0),
//!     Constraint::dependency(2, 1, "obj", 1.0),
//!     Constraint::direction(1, Direction::Root, 0.5),
//!     Constraint::direction(2, Direction::Right, 0.5),
//! ]).unwrap();
//!
//! let outcome = ChartParser::default().parse(&facts);
//! assert_eq!(outcome.tree.heads(), vec![0, 1]);
//! assert_eq!(outcome.tree.get(2).unwrap().label, "obj");
//! ```

mod backtrace;
pub mod chart;
pub mod outcome;
pub mod parser;


pub use chart::{Cell, CellKind, Chart};
pub use outcome::ParseOutcome;
pub use parser::ChartParser;
