//! Token to feature index mapping.
//!
//! Indices are assigned densely from 0 in first-occurrence order across the
//! training corpus. Once built, a [`Vocabulary`] never grows: looking up an
//! unknown token returns `None`.
//!
//! # Examples
//!
//! ```
//! use penmark::feature::VocabularyBuilder;
//!
//! let vocabulary = VocabularyBuilder::build_from(vec![
//!     vec!["apple", "banana", "apple"],
//!     vec!["car", "banana"],
//! ])
//! .unwrap();
//!
//! assert_eq!(vocabulary.len(), 3);
//! assert_eq!(vocabulary.get("apple"), Some(0));
//! assert_eq!(vocabulary.get("banana"), Some(1));
//! assert_eq!(vocabulary.get("car"), Some(2));
//! assert_eq!(vocabulary.get("truck"), None);
//! ```

use ahash::AHashMap;
use tracing::debug;

use crate::error::{PenmarkError, Result};

/// A frozen mapping from token to feature index.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Index -> term.
    terms: Vec<String>,
    /// Term -> index.
    index: AHashMap<String, usize>,
}

impl Vocabulary {
    /// Rebuild a vocabulary from its terms in index order.
    ///
    /// Used when restoring a persisted model; duplicate terms mean the
    /// record is corrupt.
    pub fn from_terms(terms: Vec<String>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(terms.len());
        for (idx, term) in terms.iter().enumerate() {
            if index.insert(term.clone(), idx).is_some() {
                return Err(PenmarkError::serialization(format!(
                    "duplicate vocabulary term {term:?} at index {idx}"
                )));
            }
        }
        Ok(Vocabulary { terms, index })
    }

    /// Feature index of `term`, if known.
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term stored at `index`.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// Check if `term` is in the vocabulary.
    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the vocabulary has no features.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Iterate over `(index, term)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.terms.iter().map(String::as_str).enumerate()
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

impl Eq for Vocabulary {}

/// Accumulates tokens from training documents into a [`Vocabulary`].
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    terms: Vec<String>,
    index: AHashMap<String, usize>,
    max_size: Option<usize>,
    documents: usize,
}

impl VocabularyBuilder {
    /// Create an empty builder with no size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of distinct terms.
    pub fn with_max_size(mut self, max_size: Option<usize>) -> Self {
        self.max_size = max_size;
        self
    }

    /// Number of documents added so far.
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Add the tokens of one document, in order.
    pub fn add_document<I, S>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref();
            if self.index.contains_key(token) {
                continue;
            }
            if let Some(max) = self.max_size
                && self.terms.len() >= max
            {
                return Err(PenmarkError::resource_exhausted(format!(
                    "vocabulary exceeds the configured maximum of {max} terms"
                )));
            }
            self.index.insert(token.to_string(), self.terms.len());
            self.terms.push(token.to_string());
        }
        self.documents += 1;
        Ok(())
    }

    /// Freeze the accumulated terms.
    pub fn build(self) -> Result<Vocabulary> {
        if self.documents == 0 {
            return Err(PenmarkError::configuration(
                "cannot build a vocabulary from zero documents",
            ));
        }
        debug!(
            documents = self.documents,
            terms = self.terms.len(),
            "Built vocabulary"
        );
        Ok(Vocabulary {
            terms: self.terms,
            index: self.index,
        })
    }

    /// Build a vocabulary from tokenized documents in iteration order.
    pub fn build_from<D, I, S>(documents: D) -> Result<Vocabulary>
    where
        D: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        for tokens in documents {
            builder.add_document(tokens)?;
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_first_occurrence_order() {
        let vocabulary = VocabularyBuilder::build_from(vec![
            vec!["whale", "sea"],
            vec!["ship", "whale", "harpoon"],
        ])
        .unwrap();

        let terms: Vec<_> = vocabulary.iter().collect();
        assert_eq!(
            terms,
            vec![(0, "whale"), (1, "sea"), (2, "ship"), (3, "harpoon")]
        );
        assert_eq!(vocabulary.term(2), Some("ship"));
        assert_eq!(vocabulary.term(4), None);
    }

    #[test]
    fn test_zero_documents() {
        let err = VocabularyBuilder::build_from(Vec::<Vec<&str>>::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_documents_without_tokens() {
        let vocabulary = VocabularyBuilder::build_from(vec![Vec::<&str>::new()]).unwrap();
        assert!(vocabulary.is_empty());
    }

    #[test]
    fn test_max_size() {
        let mut builder = VocabularyBuilder::new().with_max_size(Some(2));
        builder.add_document(["a1", "a2", "a1"]).unwrap();
        assert_eq!(builder.document_count(), 1);

        let err = builder.add_document(["a3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceExhausted);
    }

    #[test]
    fn test_from_terms() {
        let vocabulary =
            Vocabulary::from_terms(vec!["x".to_string(), "y".to_string()]).unwrap();
        assert_eq!(vocabulary.get("y"), Some(1));

        let err = Vocabulary::from_terms(vec!["x".to_string(), "x".to_string()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }
}
