//! Satisfied-fact sets.

use depforge_core::{FactId, FactSet};
use smallvec::SmallVec;

/// Facts already counted toward a chart cell's score.
///
/// Stored as a sorted, duplicate-free small vector of dense ids; sets are
/// built once per cell by merging the children's sets and never modified.
///
/// # Example
///
/// ```
/// use depforge_core::FactId;
/// use depforge_scoring::SatisfiedSet;
///
/// let a = SatisfiedSet::from_ids([FactId::new(3), FactId::new(1)]);
/// let b = SatisfiedSet::from_ids([FactId::new(2), FactId::new(3)]);
/// let both = a.union(&b, &[]);
///
/// assert_eq!(both.len(), 3);
/// assert!(both.contains(FactId::new(2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SatisfiedSet {
    ids: SmallVec<[FactId; 8]>,
}

impl SatisfiedSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from ids in any order.
    pub fn from_ids(ids: impl IntoIterator<Item = FactId>) -> Self {
        let mut ids: SmallVec<[FactId; 8]> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns true if the fact was already counted.
    #[inline]
    pub fn contains(&self, id: FactId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Iterates over the ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = FactId> + '_ {
        self.ids.iter().copied()
    }

    /// Returns the ids as a sorted slice.
    pub fn as_slice(&self) -> &[FactId] {
        &self.ids
    }

    /// Merges this set, `other` and the sorted ids of `extra`.
    pub fn union(&self, other: &SatisfiedSet, extra: &[FactId]) -> SatisfiedSet {
        let merged = merge(&self.ids, &other.ids);
        if extra.is_empty() {
            return SatisfiedSet { ids: merged };
        }
        SatisfiedSet {
            ids: merge(&merged, extra),
        }
    }

    /// Sums the weights of the facts present in both sets.
    ///
    /// Walks both sorted sequences once; allocates nothing.
    pub fn overlap_weight(&self, other: &SatisfiedSet, facts: &FactSet) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut weight = 0.0;
        while i < self.ids.len() && j < other.ids.len() {
            match self.ids[i].cmp(&other.ids[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    weight += facts.weight(self.ids[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        weight
    }

    /// Sums the weights of all facts in the set.
    pub fn total_weight(&self, facts: &FactSet) -> f64 {
        self.ids.iter().map(|&id| facts.weight(id)).sum()
    }
}

fn merge(a: &[FactId], b: &[FactId]) -> SmallVec<[FactId; 8]> {
    let mut out = SmallVec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use depforge_core::{Constraint, Direction};

    fn ids(raw: &[u32]) -> SatisfiedSet {
        SatisfiedSet::from_ids(raw.iter().map(|&i| FactId::new(i)))
    }

    #[test]
    fn test_from_ids_sorts_and_dedups() {
        let set = ids(&[4, 1, 4, 2]);
        let raw: Vec<_> = set.iter().map(FactId::index).collect();
        assert_eq!(raw, vec![1, 2, 4]);
    }

    #[test]
    fn test_union_with_extra() {
        let a = ids(&[0, 4]);
        let b = ids(&[2, 4, 6]);
        let extra = [FactId::new(1), FactId::new(6), FactId::new(9)];
        let both = a.union(&b, &extra);
        let raw: Vec<_> = both.iter().map(FactId::index).collect();
        assert_eq!(raw, vec![0, 1, 2, 4, 6, 9]);
        assert!(!both.contains(FactId::new(3)));
    }

    #[test]
    fn test_overlap_weight() {
        let facts = FactSet::from_facts(
            2,
            [
                Constraint::direction(1, Direction::Root, 0.5),
                Constraint::direction(2, Direction::Left, 0.25),
                Constraint::incoming_relation(1, "obj", 2.0),
            ],
        )
        .unwrap();
        let a = ids(&[0, 2]);
        let b = ids(&[1, 2]);
        assert_eq!(a.overlap_weight(&b, &facts), 2.0);
        assert_eq!(a.overlap_weight(&SatisfiedSet::new(), &facts), 0.0);
        assert_eq!(a.total_weight(&facts), 2.5);
    }
}
