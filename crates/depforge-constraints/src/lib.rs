//! Constraint construction for depforge.
//!
//! This crate turns the three ordered classifier-result streams of a
//! sentence into the [`FactSet`](depforge_core::FactSet) read by the chart
//! parser:
//! - [`InstanceLayout`] fixes the order in which instances are classified
//! - [`ConstraintBuilder`] consumes the streams in exactly that order

pub mod builder;
pub mod error;
pub mod layout;

pub use builder::ConstraintBuilder;
pub use error::{BuildError, Stream};
pub use layout::{EdgeInstance, InstanceLayout};
