//! Multinomial naive Bayes model.
//!
//! # Architecture
//!
//! - [`ClassStatistics`]: per-label feature count sums gathered during training
//! - [`NaiveBayesTrainer`]: turns statistics into smoothed log-probabilities
//! - [`TrainedModel`]: the immutable result; scores feature vectors
//! - [`Classification`]: ranked, normalized label probabilities
//! - [`codec`]: the versioned binary record a model is persisted as

pub mod classification;
pub mod codec;
pub mod naive_bayes;
pub mod statistics;

pub use classification::{Classification, LabelProbability};
pub use naive_bayes::{ModelMetadata, NaiveBayesTrainer, TrainedModel};
pub use statistics::{ClassCounts, ClassStatistics};
