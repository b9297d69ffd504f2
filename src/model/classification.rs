//! Ranked classification results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One label and its posterior probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelProbability {
    pub label: String,
    pub probability: f64,
}

/// Labels ranked by descending posterior probability.
///
/// Every label known to the model appears exactly once and the
/// probabilities sum to 1. Equal probabilities are ordered by label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    ranked: Vec<LabelProbability>,
}

impl Classification {
    /// Normalize per-label log scores into a ranked distribution.
    ///
    /// Uses log-sum-exp: the maximum score is subtracted before
    /// exponentiating so long documents do not underflow to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use penmark::model::Classification;
    ///
    /// let labels = vec!["x".to_string(), "y".to_string()];
    /// let result = Classification::from_log_scores(&labels, &[-1000.0, -1001.0]);
    ///
    /// assert_eq!(result.best().unwrap().label, "x");
    /// let total: f64 = result.iter().map(|p| p.probability).sum();
    /// assert!((total - 1.0).abs() < 1e-12);
    /// ```
    pub fn from_log_scores(labels: &[String], scores: &[f64]) -> Self {
        debug_assert_eq!(labels.len(), scores.len());

        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let probabilities: Vec<f64> = if max.is_finite() {
            let exps: Vec<f64> = scores.iter().map(|&s| (s - max).exp()).collect();
            let sum: f64 = exps.iter().sum();
            exps.into_iter().map(|e| e / sum).collect()
        } else {
            vec![1.0 / scores.len() as f64; scores.len()]
        };

        let mut ranked: Vec<LabelProbability> = labels
            .iter()
            .zip(probabilities)
            .map(|(label, probability)| LabelProbability {
                label: label.clone(),
                probability,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.probability
                .total_cmp(&a.probability)
                .then_with(|| a.label.cmp(&b.label))
        });

        Classification { ranked }
    }

    /// The highest ranked label.
    pub fn best(&self) -> Option<&LabelProbability> {
        self.ranked.first()
    }

    /// Entry at `rank` (0 is best).
    pub fn at_rank(&self, rank: usize) -> Option<&LabelProbability> {
        self.ranked.get(rank)
    }

    /// Rank of `label`, if the model knows it.
    pub fn rank_of(&self, label: &str) -> Option<usize> {
        self.ranked.iter().position(|p| p.label == label)
    }

    /// Probability assigned to `label`.
    pub fn probability_of(&self, label: &str) -> Option<f64> {
        self.ranked
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.probability)
    }

    /// Labels in rank order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.ranked.iter().map(|p| p.label.as_str())
    }

    /// Iterate over the ranked entries.
    pub fn iter(&self) -> std::slice::Iter<'_, LabelProbability> {
        self.ranked.iter()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Consume the result, returning the ranked entries.
    pub fn into_vec(self) -> Vec<LabelProbability> {
        self.ranked
    }
}

impl<'a> IntoIterator for &'a Classification {
    type Item = &'a LabelProbability;
    type IntoIter = std::slice::Iter<'a, LabelProbability>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranked.iter()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.ranked {
            writeln!(f, "  {}: {:.1}%", entry.label, entry.probability * 100.0)?;
        }
        Ok(())
    }
}
