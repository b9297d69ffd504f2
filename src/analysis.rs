//! Text analysis for Penmark.
//!
//! Turns raw document text into the normalized token stream the feature
//! layer counts. The steps run in a fixed order: lowercase, split on the
//! configured pattern, drop stop words.

pub mod stop;
pub mod token;
pub mod tokenizer;

pub use stop::StopFilter;
pub use token::{Token, TokenStream};
pub use tokenizer::Tokenizer;
