//! Per-class count aggregation.

use std::collections::BTreeMap;

use crate::feature::FeatureVector;

/// Summed feature counts and document count for one label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCounts {
    /// Element-wise sum of the label's document vectors.
    pub features: FeatureVector,
    /// Number of training documents with the label.
    pub documents: usize,
}

impl ClassCounts {
    /// Total token count, `total(c)`.
    pub fn total_tokens(&self) -> u64 {
        self.features.total()
    }
}

/// Training statistics for every label seen so far.
///
/// Labels are kept in lexicographic order, which fixes the class order of
/// the trained model.
#[derive(Debug, Clone, Default)]
pub struct ClassStatistics {
    classes: BTreeMap<String, ClassCounts>,
    documents: usize,
}

impl ClassStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one training document's vector under `label`.
    pub fn observe(&mut self, label: &str, vector: &FeatureVector) {
        let counts = self.classes.entry(label.to_string()).or_default();
        counts.features.accumulate(vector);
        counts.documents += 1;
        self.documents += 1;
    }

    /// Total number of observed documents, `N`.
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Number of distinct labels.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Counts for `label`.
    pub fn get(&self, label: &str) -> Option<&ClassCounts> {
        self.classes.get(label)
    }

    /// Labels in lexicographic order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Iterate over `(label, counts)` in lexicographic label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassCounts)> {
        self.classes
            .iter()
            .map(|(label, counts)| (label.as_str(), counts))
    }
}
