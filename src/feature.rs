//! Feature extraction: vocabulary construction and count vectorization.

pub mod vector;
pub mod vocabulary;

pub use vector::{FeatureVector, vectorize};
pub use vocabulary::{Vocabulary, VocabularyBuilder};
