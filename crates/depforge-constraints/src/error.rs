//! Error types for constraint building

use std::fmt;

use depforge_core::FactError;
use thiserror::Error;

/// One of the three classifier-result streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Root-attachment and (dependent, head) pair instances.
    Edge,
    /// One instance per token: where the head lies.
    Direction,
    /// One instance per token: incoming relation type.
    Role,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Edge => write!(f, "edge"),
            Stream::Direction => write!(f, "direction"),
            Stream::Role => write!(f, "role"),
        }
    }
}

/// Error building the fact set of one sentence.
///
/// Every variant is an integration error: the sentence is not parsed, but
/// other sentences of a batch are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// The sentence has no tokens.
    #[error("cannot build constraints for an empty sentence")]
    EmptySentence,

    /// A stream does not hold exactly one result per instance.
    #[error("{stream} stream has {actual} results, expected {expected}")]
    StreamLength {
        stream: Stream,
        expected: usize,
        actual: usize,
    },

    /// A result could not be turned into a valid fact.
    #[error("{stream} stream result {position}: {source}")]
    Fact {
        stream: Stream,
        position: usize,
        #[source]
        source: FactError,
    },
}
