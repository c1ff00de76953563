//! Shared test fixtures for depforge crates.
//!
//! This crate provides fact sets, classifier streams and tree assertions for
//! testing. It does NOT depend on `depforge-scoring` or `depforge-parser` so
//! those crates can use it as a dev-dependency.
//!
//! - [`facts`] - hand-built and seeded random fact sets
//! - [`streams`] - classifier-result streams scripted from a gold tree
//! - [`assertions`] - tree shape and score assertions
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! depforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use depforge_test::facts::{random_fact_set, two_token_facts};
//! use depforge_test::assertions::assert_attachments;
//! ```

pub mod assertions;
pub mod facts;
pub mod streams;

// Re-export commonly used items at crate root for convenience
pub use assertions::{assert_attachments, assert_close, assert_projective};
pub use facts::{random_fact_set, single_token_facts, two_token_facts, RandomFacts};
pub use streams::ClassifierStreams;
