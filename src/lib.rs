//! # Penmark
//!
//! Authorship attribution for Rust with multinomial naive Bayes.
//!
//! ## Features
//!
//! - Configurable regex tokenizer with stop word filtering
//! - Frozen vocabularies and sparse count vectors
//! - Laplace-smoothed naive Bayes with log-space scoring
//! - Ranked, normalized label probabilities
//! - Versioned, checksummed model persistence
//! - Parallel batch classification

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod feature;
pub mod model;

pub mod prelude {
    pub use crate::classifier::AuthorClassifier;
    pub use crate::config::{ClassifierConfig, StopWords, TokenizerConfig, TrainingConfig};
    pub use crate::document::Document;
    pub use crate::error::{ErrorKind, PenmarkError, Result};
    pub use crate::model::{Classification, LabelProbability, TrainedModel};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
