//! Sparse count vectors over a vocabulary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::feature::vocabulary::Vocabulary;

/// Sparse mapping from feature index to occurrence count.
///
/// Indices are kept sorted, so iteration order (and anything summed from it)
/// depends only on the token multiset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    counts: BTreeMap<usize, u64>,
    dimension: usize,
}

impl FeatureVector {
    /// Create an empty vector over a vocabulary of `dimension` features.
    pub fn new(dimension: usize) -> Self {
        FeatureVector {
            counts: BTreeMap::new(),
            dimension,
        }
    }

    /// Add `count` occurrences of feature `index`.
    pub fn add(&mut self, index: usize, count: u64) {
        if count > 0 {
            *self.counts.entry(index).or_insert(0) += count;
        }
    }

    /// Add every count of `other` into this vector.
    pub fn accumulate(&mut self, other: &FeatureVector) {
        for (index, count) in other.iter() {
            self.add(index, count);
        }
        self.dimension = self.dimension.max(other.dimension);
    }

    /// Count for feature `index`.
    pub fn get(&self, index: usize) -> u64 {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    /// Length of the implicit dense vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of features with a non-zero count.
    pub fn nnz(&self) -> usize {
        self.counts.len()
    }

    /// Check if every count is zero.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over `(index, count)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().map(|(&index, &count)| (index, count))
    }
}

/// Count the in-vocabulary tokens of a document.
///
/// Tokens missing from `vocabulary` are dropped.
///
/// # Examples
///
/// ```
/// use penmark::feature::{VocabularyBuilder, vectorize};
///
/// let vocabulary = VocabularyBuilder::build_from(vec![vec!["apple", "banana"]]).unwrap();
/// let vector = vectorize(["apple", "apple", "kiwi"], &vocabulary);
///
/// assert_eq!(vector.get(0), 2);
/// assert_eq!(vector.get(1), 0);
/// assert_eq!(vector.total(), 2);
/// assert_eq!(vector.dimension(), 2);
/// ```
pub fn vectorize<I, S>(tokens: I, vocabulary: &Vocabulary) -> FeatureVector
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut vector = FeatureVector::new(vocabulary.len());
    for token in tokens {
        if let Some(index) = vocabulary.get(token.as_ref()) {
            vector.add(index, 1);
        }
    }
    vector
}
