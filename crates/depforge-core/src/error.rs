//! Error types for fact construction

use thiserror::Error;

use crate::TokenIndex;

/// Error raised when a fact violates the fact-set invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactError {
    /// A direction label other than `ROOT`, `LEFT` or `RIGHT`.
    #[error("unknown direction label '{0}'")]
    UnknownDirection(String),

    /// A negative, NaN or infinite weight.
    #[error("weight {weight} for token {token} is not a finite non-negative number")]
    InvalidWeight { token: TokenIndex, weight: f64 },

    /// A token index outside the sentence.
    #[error("token index {index} is out of range for a sentence of {length} tokens")]
    TokenOutOfRange { index: TokenIndex, length: usize },
}
