//! The external classifier contract.

use depforge_core::Prediction;

use crate::error::ClassifierError;
use crate::sentence::Sentence;

/// Result of classifying the instances of one sentence.
pub type ClassifierResult = Result<Vec<Prediction>, ClassifierError>;

/// A black-box scored-label predictor.
///
/// Receives the instances of one sentence in layout order and answers one
/// [`Prediction`] per instance, in the same order. The edge classifier takes
/// [`EdgeInstance`](depforge_constraints::EdgeInstance)s; the direction and
/// role classifiers take token indices.
///
/// Closures with the matching signature implement the trait.
///
/// # Example
///
/// ```
/// use depforge::{Classifier, ClassifierResult, Sentence};
/// use depforge_core::{Prediction, TokenIndex};
///
/// let roles = |_: &Sentence, tokens: &[TokenIndex]| -> ClassifierResult {
///     Ok(tokens.iter().map(|_| Prediction::new("__", 1.0)).collect())
/// };
///
/// let sentence = Sentence::from_forms(["a", "b"]);
/// assert_eq!(roles.classify(&sentence, &[1, 2]).unwrap().len(), 2);
/// ```
pub trait Classifier<I>: Send + Sync {
    /// Classifies `instances` of `sentence`.
    fn classify(&self, sentence: &Sentence, instances: &[I]) -> ClassifierResult;
}

impl<I, F> Classifier<I> for F
where
    F: Fn(&Sentence, &[I]) -> ClassifierResult + Send + Sync,
{
    fn classify(&self, sentence: &Sentence, instances: &[I]) -> ClassifierResult {
        self(sentence, instances)
    }
}
