//! Documents to train on or classify.
//!
//! A document is a piece of text with an optional title and an optional
//! label (the author, for authorship attribution). Training documents carry
//! a label; query documents usually do not.
//!
//! The text is either supplied up front or produced on first use by a
//! caller-supplied loader, so corpora can be described cheaply and fetched
//! lazily by whatever collaborator owns the I/O.
//!
//! # Examples
//!
//! ```
//! use penmark::document::Document;
//!
//! let hamlet = Document::labeled("To be, or not to be", "William Shakespeare")
//!     .with_title("Hamlet");
//! assert_eq!(hamlet.label(), Some("William Shakespeare"));
//! assert_eq!(hamlet.to_string(), "\"Hamlet\" by William Shakespeare");
//!
//! let query = Document::deferred(|| Ok("When in the Course of human events".to_string()));
//! assert!(query.label().is_none());
//! assert_eq!(&*query.text().unwrap(), "When in the Course of human events");
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::{PenmarkError, Result};

type TextLoader = dyn Fn() -> Result<String> + Send + Sync;

#[derive(Clone)]
enum DocumentText {
    Loaded(Arc<str>),
    Deferred {
        loader: Arc<TextLoader>,
        cache: Arc<OnceLock<Arc<str>>>,
    },
}

/// A text with an optional title and label.
#[derive(Clone)]
pub struct Document {
    title: Option<String>,
    label: Option<String>,
    text: DocumentText,
}

impl Document {
    /// An unlabeled document with the given text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        let text: String = text.into();
        Document {
            title: None,
            label: None,
            text: DocumentText::Loaded(Arc::from(text)),
        }
    }

    /// A labeled document with the given text.
    pub fn labeled<S: Into<String>, L: Into<String>>(text: S, label: L) -> Self {
        Self::new(text).with_label(label)
    }

    /// A document whose text is produced by `loader` on first access.
    ///
    /// The loader runs at most once per successful load; its result is
    /// shared by clones of the document. A loader error or blank text is
    /// reported as a source error.
    pub fn deferred<F>(loader: F) -> Self
    where
        F: Fn() -> Result<String> + Send + Sync + 'static,
    {
        Document {
            title: None,
            label: None,
            text: DocumentText::Deferred {
                loader: Arc::new(loader),
                cache: Arc::new(OnceLock::new()),
            },
        }
    }

    /// Set the title.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the label.
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Check whether the text has been materialized.
    pub fn is_loaded(&self) -> bool {
        match &self.text {
            DocumentText::Loaded(_) => true,
            DocumentText::Deferred { cache, .. } => cache.get().is_some(),
        }
    }

    /// The document text, loading it first if it is deferred.
    pub fn text(&self) -> Result<Arc<str>> {
        match &self.text {
            DocumentText::Loaded(text) => Ok(Arc::clone(text)),
            DocumentText::Deferred { loader, cache } => {
                if let Some(text) = cache.get() {
                    return Ok(Arc::clone(text));
                }
                let text = loader().map_err(|e| match e {
                    PenmarkError::Source(_) => e,
                    other => PenmarkError::source_text(format!("{self}: {other}")),
                })?;
                if text.trim().is_empty() {
                    return Err(PenmarkError::source_text(format!("no text found for {self}")));
                }
                Ok(Arc::clone(cache.get_or_init(|| Arc::from(text))))
            }
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "\"{title}\"")?,
            None => f.write_str("untitled document")?,
        }
        if let Some(label) = &self.label {
            write!(f, " by {label}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("title", &self.title)
            .field("label", &self.label)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
