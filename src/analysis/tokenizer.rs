//! Regex-based tokenizer.
//!
//! The tokenizer applies its steps in a fixed order:
//!
//! ```text
//! raw text → lowercase → split on pattern (default \S+) → stop filter → tokens
//! ```
//!
//! Punctuation attached to a word stays part of the token: `"end."` and
//! `"end"` are different features.
//!
//! # Examples
//!
//! ```
//! use penmark::analysis::Tokenizer;
//!
//! let tokenizer = Tokenizer::default();
//! let tokens: Vec<String> = tokenizer
//!     .tokenize("The Quick fox, jumped.")
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(tokens, vec!["quick", "fox,", "jumped."]);
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::analysis::stop::StopFilter;
use crate::analysis::token::{Token, TokenStream};
use crate::config::TokenizerConfig;
use crate::error::{PenmarkError, Result};

/// Splits raw text into normalized, stop-word-free tokens.
///
/// A tokenizer is immutable after construction and cheap to clone; clones
/// share the compiled pattern and stop word set.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    pattern: Arc<Regex>,
    stop_filter: StopFilter,
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a tokenizer from its configuration.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        let regex = Regex::new(&config.pattern).map_err(|e| {
            PenmarkError::configuration(format!("Invalid token pattern {:?}: {e}", config.pattern))
        })?;
        let stop_filter = StopFilter::from_config(&config.stop_words, config.lowercase);

        Ok(Tokenizer {
            pattern: Arc::new(regex),
            stop_filter,
            config,
        })
    }

    /// The configuration this tokenizer was built from.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// The stop filter applied after splitting.
    pub fn stop_filter(&self) -> &StopFilter {
        &self.stop_filter
    }

    /// Tokenize `text`.
    ///
    /// Empty or whitespace-only text yields an empty stream.
    pub fn tokenize(&self, text: &str) -> TokenStream {
        let normalized = if self.config.lowercase {
            text.to_lowercase()
        } else {
            text.to_owned()
        };

        let split = self
            .pattern
            .find_iter(&normalized)
            .filter(|mat| !mat.as_str().is_empty())
            .enumerate()
            .map(|(position, mat)| Token::new(mat.as_str(), position));

        let tokens: Vec<Token> = self.stop_filter.filter(split).collect();
        tokens.into_iter()
    }

    /// Tokenize `text` and keep only the token strings.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.tokenize(text).map(|token| token.text).collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default()).expect("Default token pattern should be valid")
    }
}
