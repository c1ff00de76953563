//! The per-sentence set of facts.

use crate::constraint::{Constraint, ConstraintKind, FactId};
use crate::error::FactError;
use crate::TokenIndex;

/// All facts known about one sentence of `sentence_length` tokens.
///
/// Facts are validated on insertion: weights are finite and non-negative,
/// fact tokens lie in `1..=N` and heads in `0..=N`. Duplicates are kept.
///
/// # Example
///
/// ```
/// use depforge_core::{Constraint, Direction, FactSet};
///
/// let mut facts = FactSet::new(2);
/// let id = facts.push(Constraint::dependency(2, 1, "obj", 0.8)).unwrap();
/// facts.push(Constraint::direction(2, Direction::Left, 0.4)).unwrap();
///
/// assert_eq!(facts.len(), 2);
/// assert_eq!(facts.weight(id), 0.8);
/// assert!(facts.push(Constraint::direction(3, Direction::Left, 0.1)).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactSet {
    sentence_length: usize,
    facts: Vec<Constraint>,
}

impl FactSet {
    /// Creates an empty fact set for a sentence of `sentence_length` tokens.
    pub fn new(sentence_length: usize) -> Self {
        Self {
            sentence_length,
            facts: Vec::new(),
        }
    }

    /// Creates a fact set from facts, validating each one.
    pub fn from_facts(
        sentence_length: usize,
        facts: impl IntoIterator<Item = Constraint>,
    ) -> Result<Self, FactError> {
        let mut set = Self::new(sentence_length);
        for fact in facts {
            set.push(fact)?;
        }
        Ok(set)
    }

    /// Adds a fact and returns its id.
    pub fn push(&mut self, fact: Constraint) -> Result<FactId, FactError> {
        let weight = fact.weight();
        if !weight.is_finite() || weight < 0.0 {
            return Err(FactError::InvalidWeight {
                token: fact.token_index(),
                weight,
            });
        }
        self.check_token(fact.token_index(), 1)?;
        if let Constraint::Dependency { head, .. } = &fact {
            self.check_token(*head, 0)?;
        }

        let id = FactId::new(self.facts.len() as u32);
        self.facts.push(fact);
        Ok(id)
    }

    fn check_token(&self, index: TokenIndex, lowest: TokenIndex) -> Result<(), FactError> {
        if index < lowest || index > self.sentence_length {
            return Err(FactError::TokenOutOfRange {
                index,
                length: self.sentence_length,
            });
        }
        Ok(())
    }

    /// Returns the number of tokens in the sentence.
    #[inline]
    pub fn sentence_length(&self) -> usize {
        self.sentence_length
    }

    /// Returns the fact with the given id.
    ///
    /// # Panics
    /// Panics if the id was not issued by this set.
    #[inline]
    pub fn get(&self, id: FactId) -> &Constraint {
        &self.facts[id.index()]
    }

    /// Returns the weight of the fact with the given id.
    #[inline]
    pub fn weight(&self, id: FactId) -> f64 {
        self.get(id).weight()
    }

    /// Iterates over all facts with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FactId, &Constraint)> + '_ {
        self.facts
            .iter()
            .enumerate()
            .map(|(i, fact)| (FactId::new(i as u32), fact))
    }

    /// Returns the number of facts.
    #[inline]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if the set holds no facts.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Counts the facts of one kind.
    pub fn count_of(&self, kind: ConstraintKind) -> usize {
        self.facts.iter().filter(|fact| fact.kind() == kind).count()
    }

    /// Returns the sum of all fact weights.
    pub fn total_weight(&self) -> f64 {
        self.facts.iter().map(Constraint::weight).sum()
    }
}
