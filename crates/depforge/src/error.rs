//! Error types for the parsing pipeline.

use depforge_constraints::{BuildError, Stream};
use thiserror::Error;

/// Failure reported by an external classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClassifierError {
    message: String,
}

impl ClassifierError {
    /// Creates an error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error parsing one sentence.
///
/// Fatal for the sentence only; batch parsing reports it in the sentence's
/// slot and carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("cannot parse an empty sentence")]
    EmptySentence,

    #[error("{stream} classifier failed: {source}")]
    Classifier {
        stream: Stream,
        #[source]
        source: ClassifierError,
    },

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl ParseError {
    /// Returns the stream the error originated from, if any.
    pub fn stream(&self) -> Option<Stream> {
        match self {
            ParseError::EmptySentence => None,
            ParseError::Classifier { stream, .. } => Some(*stream),
            ParseError::Build(BuildError::EmptySentence) => None,
            ParseError::Build(BuildError::StreamLength { stream, .. })
            | ParseError::Build(BuildError::Fact { stream, .. }) => Some(*stream),
        }
    }
}
