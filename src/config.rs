//! Configuration for tokenization and training.
//!
//! Every knob that changes how text becomes features lives in
//! [`TokenizerConfig`]; a trained model stores the configuration that
//! produced it so inference always rebuilds the same tokenizer.
//!
//! Configurations can be read from JSON. Missing fields take their defaults
//! and unknown fields are rejected:
//!
//! ```
//! use penmark::config::{ClassifierConfig, StopWords};
//!
//! let config = ClassifierConfig::from_json_str(
//!     r#"{ "tokenizer": { "stop_words": "none" }, "training": { "smoothing": 0.5 } }"#,
//! ).unwrap();
//!
//! assert_eq!(config.tokenizer.stop_words, StopWords::None);
//! assert_eq!(config.tokenizer.pattern, r"\S+");
//! assert_eq!(config.training.smoothing, 0.5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PenmarkError, Result};

/// Default token pattern: maximal runs of non-whitespace.
pub const DEFAULT_TOKEN_PATTERN: &str = r"\S+";

/// Default additive smoothing (Laplace).
pub const DEFAULT_SMOOTHING: f64 = 1.0;

/// Stop word set applied after splitting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWords {
    /// The built-in English list.
    #[default]
    English,
    /// Keep every token.
    None,
    /// A caller-supplied list.
    Custom(Vec<String>),
}

/// Configuration for the [`Tokenizer`](crate::analysis::Tokenizer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Regex whose matches become tokens.
    pub pattern: String,

    /// Lowercase the text before splitting.
    pub lowercase: bool,

    /// Stop words removed after splitting.
    pub stop_words: StopWords,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
            stop_words: StopWords::English,
        }
    }
}

/// Configuration for naive Bayes training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Additive smoothing pseudo-count added to every feature count.
    pub smoothing: f64,

    /// Upper bound on the vocabulary size.
    /// If None, the vocabulary may grow without limit.
    pub max_vocabulary_size: Option<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            max_vocabulary_size: None,
        }
    }
}

impl TrainingConfig {
    /// Check the configuration values.
    pub fn validate(&self) -> Result<()> {
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(PenmarkError::configuration(format!(
                "smoothing must be a positive finite number, got {}",
                self.smoothing
            )));
        }
        if self.max_vocabulary_size == Some(0) {
            return Err(PenmarkError::configuration(
                "max_vocabulary_size must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Top-level configuration for an [`AuthorClassifier`](crate::classifier::AuthorClassifier).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Text analysis settings.
    pub tokenizer: TokenizerConfig,

    /// Training settings.
    pub training: TrainingConfig,
}

impl ClassifierConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ClassifierConfig = serde_json::from_str(json)?;
        config.training.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
