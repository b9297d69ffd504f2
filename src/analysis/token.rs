//! Token types for text analysis.
//!
//! # Examples
//!
//! ```
//! use penmark::analysis::token::Token;
//!
//! let token = Token::new("hello", 0);
//! assert_eq!(token.text, "hello");
//! assert_eq!(token.position, 0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single normalized unit of text produced by the [`Tokenizer`](super::Tokenizer).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The normalized text of the token
    pub text: String,

    /// Position of the token in the split sequence, before stop words were
    /// removed (0-based)
    pub position: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// A finite, ordered stream of tokens.
///
/// The stream owns its tokens, so cloning it yields an independent iterator
/// over the same sequence from the current point.
pub type TokenStream = std::vec::IntoIter<Token>;
