//! Multinomial naive Bayes training and scoring.
//!
//! For a label `c` with `N(c)` of the `N` training documents, `count(c, i)`
//! occurrences of feature `i`, `total(c)` tokens in all, a vocabulary of `V`
//! features and smoothing `α` (1 by default, which is Laplace smoothing):
//!
//! ```text
//! log P(c)     = ln(N(c) / N)
//! log P(i | c) = ln((count(c, i) + α) / (total(c) + α·V))
//! score(c)     = log P(c) + Σ n_i · log P(i | c)
//! ```
//!
//! Scores stay in log space; [`Classification::from_log_scores`] turns them
//! into probabilities.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::config::{ClassifierConfig, DEFAULT_SMOOTHING, TokenizerConfig, TrainingConfig};
use crate::error::{PenmarkError, Result};
use crate::feature::{FeatureVector, Vocabulary};
use crate::model::classification::Classification;
use crate::model::statistics::ClassStatistics;

/// Descriptive facts about how a model was trained.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMetadata {
    /// Unique identifier assigned at training time.
    pub model_id: Uuid,
    /// When training finished.
    pub trained_at: DateTime<Utc>,
    /// Total training documents, `N`.
    pub document_count: usize,
    /// Training documents per label, in label order.
    pub class_document_counts: Vec<usize>,
    /// Additive smoothing used for the likelihoods.
    pub smoothing: f64,
    /// Vocabulary cap in force during training, if any.
    pub max_vocabulary_size: Option<usize>,
}

/// An immutable, trained naive Bayes model.
///
/// Labels are stored in lexicographic order; `log_likelihoods[c][i]` is
/// `log P(i | c)` for label index `c` and feature index `i`.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    metadata: ModelMetadata,
    tokenizer: TokenizerConfig,
    vocabulary: Vocabulary,
    labels: Vec<String>,
    log_priors: Vec<f64>,
    log_likelihoods: Vec<Vec<f64>>,
}

impl TrainedModel {
    /// Assemble a model from already-validated parts.
    pub(crate) fn from_parts(
        metadata: ModelMetadata,
        tokenizer: TokenizerConfig,
        vocabulary: Vocabulary,
        labels: Vec<String>,
        log_priors: Vec<f64>,
        log_likelihoods: Vec<Vec<f64>>,
    ) -> Self {
        TrainedModel {
            metadata,
            tokenizer,
            vocabulary,
            labels,
            log_priors,
            log_likelihoods,
        }
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Tokenizer configuration the model was trained with.
    pub fn tokenizer_config(&self) -> &TokenizerConfig {
        &self.tokenizer
    }

    /// The configuration that reproduces this model's preprocessing and training.
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            tokenizer: self.tokenizer.clone(),
            training: TrainingConfig {
                smoothing: self.metadata.smoothing,
                max_vocabulary_size: self.metadata.max_vocabulary_size,
            },
        }
    }

    /// The frozen training vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Known labels in lexicographic order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Per-label prior log-probabilities, in label order.
    pub fn log_priors(&self) -> &[f64] {
        &self.log_priors
    }

    /// Per-label, per-feature log-likelihoods, in label order.
    pub fn log_likelihoods(&self) -> &[Vec<f64>] {
        &self.log_likelihoods
    }

    /// Prior log-probability of `label`.
    pub fn log_prior(&self, label: &str) -> Option<f64> {
        self.label_index(label).map(|c| self.log_priors[c])
    }

    /// `log P(term | label)`, if both are known.
    pub fn log_likelihood(&self, label: &str, term: &str) -> Option<f64> {
        let c = self.label_index(label)?;
        let i = self.vocabulary.get(term)?;
        Some(self.log_likelihoods[c][i])
    }

    fn label_index(&self, label: &str) -> Option<usize> {
        self.labels.binary_search_by(|l| l.as_str().cmp(label)).ok()
    }

    /// Unnormalized log score of every label, in label order.
    ///
    /// Feature indices outside the vocabulary contribute nothing.
    pub fn log_scores(&self, vector: &FeatureVector) -> Vec<f64> {
        let dimension = self.vocabulary.len();
        self.log_priors
            .iter()
            .zip(&self.log_likelihoods)
            .map(|(&prior, likelihoods)| {
                vector
                    .iter()
                    .filter(|&(index, _)| index < dimension)
                    .fold(prior, |score, (index, count)| {
                        score + count as f64 * likelihoods[index]
                    })
            })
            .collect()
    }

    /// Rank every label for `vector`.
    pub fn classify(&self, vector: &FeatureVector) -> Classification {
        Classification::from_log_scores(&self.labels, &self.log_scores(vector))
    }
}

/// Derives a [`TrainedModel`] from class statistics.
#[derive(Debug, Clone)]
pub struct NaiveBayesTrainer {
    smoothing: f64,
    max_vocabulary_size: Option<usize>,
}

impl Default for NaiveBayesTrainer {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            max_vocabulary_size: None,
        }
    }
}

impl NaiveBayesTrainer {
    /// Create a trainer with Laplace (add-one) smoothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use additive smoothing `alpha` instead of 1.
    pub fn with_smoothing(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(PenmarkError::configuration(format!(
                "smoothing must be a positive finite number, got {alpha}"
            )));
        }
        Ok(Self {
            smoothing: alpha,
            ..Self::default()
        })
    }

    /// Create a trainer from a validated training configuration.
    pub fn from_config(config: &TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            smoothing: config.smoothing,
            max_vocabulary_size: config.max_vocabulary_size,
        })
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn max_vocabulary_size(&self) -> Option<usize> {
        self.max_vocabulary_size
    }

    /// Estimate priors and smoothed likelihoods.
    ///
    /// Fails with a configuration error when fewer than two labels were
    /// observed or the vocabulary is empty, and with a resource error when
    /// the vocabulary exceeds the trainer's cap.
    pub fn train(
        &self,
        stats: &ClassStatistics,
        vocabulary: Vocabulary,
        tokenizer: TokenizerConfig,
    ) -> Result<TrainedModel> {
        if stats.class_count() < 2 {
            return Err(PenmarkError::configuration(format!(
                "classification requires at least two distinct labels, got {}",
                stats.class_count()
            )));
        }
        if vocabulary.is_empty() {
            return Err(PenmarkError::configuration(
                "vocabulary is empty; training documents contain no usable tokens",
            ));
        }
        if let Some(max) = self.max_vocabulary_size
            && vocabulary.len() > max
        {
            return Err(PenmarkError::resource_exhausted(format!(
                "vocabulary has {} terms, limit is {max}",
                vocabulary.len()
            )));
        }

        let dimension = vocabulary.len();
        let total_documents = stats.document_count() as f64;
        let alpha = self.smoothing;

        let mut labels = Vec::with_capacity(stats.class_count());
        let mut class_document_counts = Vec::with_capacity(stats.class_count());
        let mut log_priors = Vec::with_capacity(stats.class_count());
        let mut log_likelihoods = Vec::with_capacity(stats.class_count());

        for (label, counts) in stats.iter() {
            let denominator = counts.total_tokens() as f64 + alpha * dimension as f64;
            let unseen = (alpha / denominator).ln();

            let mut row = vec![unseen; dimension];
            for (index, count) in counts.features.iter() {
                if let Some(slot) = row.get_mut(index) {
                    *slot = ((count as f64 + alpha) / denominator).ln();
                }
            }

            labels.push(label.to_string());
            class_document_counts.push(counts.documents);
            log_priors.push((counts.documents as f64 / total_documents).ln());
            log_likelihoods.push(row);
        }

        let metadata = ModelMetadata {
            model_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            document_count: stats.document_count(),
            class_document_counts,
            smoothing: alpha,
            max_vocabulary_size: self.max_vocabulary_size,
        };

        info!(
            model_id = %metadata.model_id,
            documents = metadata.document_count,
            labels = labels.len(),
            vocabulary = dimension,
            "Trained naive Bayes model"
        );

        Ok(TrainedModel::from_parts(
            metadata,
            tokenizer,
            vocabulary,
            labels,
            log_priors,
            log_likelihoods,
        ))
    }
}
