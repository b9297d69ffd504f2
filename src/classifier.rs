//! Authorship classifier facade.
//!
//! [`AuthorClassifier`] wires the pipeline together:
//!
//! ```text
//! training:  documents → tokenizer → vocabulary builder → vectorizer → class statistics → trainer
//! inference: document  → tokenizer → vectorizer (frozen vocabulary) → model scores → ranking
//! ```
//!
//! The classifier holds at most one trained model. Training builds a new
//! model completely before swapping it in, so concurrent `classify` calls
//! always see either the previous model or the new one. Training and
//! loading themselves are serialized against each other.
//!
//! # Examples
//!
//! ```
//! use penmark::classifier::AuthorClassifier;
//! use penmark::document::Document;
//!
//! let classifier = AuthorClassifier::default();
//! classifier
//!     .train(&[
//!         Document::labeled("apple apple banana", "X"),
//!         Document::labeled("car car truck", "Y"),
//!     ])
//!     .unwrap();
//!
//! let result = classifier.classify(&Document::new("apple apple")).unwrap();
//! assert_eq!(result.best().unwrap().label, "X");
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::analysis::Tokenizer;
use crate::config::ClassifierConfig;
use crate::document::Document;
use crate::error::{PenmarkError, Result};
use crate::feature::{VocabularyBuilder, vectorize};
use crate::model::codec::{read_model, write_model};
use crate::model::{Classification, ClassStatistics, NaiveBayesTrainer, TrainedModel};

/// A trained model together with the tokenizer rebuilt from its configuration.
#[derive(Debug)]
struct ActiveModel {
    model: Arc<TrainedModel>,
    tokenizer: Tokenizer,
}

impl ActiveModel {
    fn new(model: TrainedModel) -> Result<Self> {
        let tokenizer = Tokenizer::new(model.tokenizer_config().clone())?;
        Ok(ActiveModel {
            model: Arc::new(model),
            tokenizer,
        })
    }

    fn classify(&self, document: &Document) -> Result<Classification> {
        if let Some(label) = document.label() {
            debug!(label, "Ignoring label on query document");
        }
        let text = document.text()?;
        let vector = vectorize(self.tokenizer.tokenize(&text), self.model.vocabulary());
        Ok(self.model.classify(&vector))
    }
}

/// Training-side state: the configuration new models are trained with and
/// the tokenizer built from it.
#[derive(Debug)]
struct TrainingSetup {
    config: ClassifierConfig,
    tokenizer: Tokenizer,
}

impl TrainingSetup {
    fn fit(&self, documents: &[Document]) -> Result<TrainedModel> {
        if documents.is_empty() {
            return Err(PenmarkError::configuration("training set is empty"));
        }
        if let Some(position) = documents.iter().position(|doc| doc.label().is_none()) {
            return Err(PenmarkError::configuration(format!(
                "training document {position} ({}) has no label",
                documents[position]
            )));
        }

        let training = &self.config.training;
        let tokenizer = &self.tokenizer;
        info!(
            documents = documents.len(),
            smoothing = training.smoothing,
            "Training classifier"
        );

        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| doc.text().map(|text| tokenizer.terms(&text)))
            .collect::<Result<_>>()?;

        let mut builder = VocabularyBuilder::new().with_max_size(training.max_vocabulary_size);
        for terms in &tokenized {
            builder.add_document(terms)?;
        }
        let vocabulary = builder.build()?;

        let mut stats = ClassStatistics::new();
        for (doc, terms) in documents.iter().zip(&tokenized) {
            if let Some(label) = doc.label() {
                stats.observe(label, &vectorize(terms, &vocabulary));
            }
        }

        NaiveBayesTrainer::from_config(training)?.train(
            &stats,
            vocabulary,
            self.config.tokenizer.clone(),
        )
    }

    /// Take over the configuration of a model that is about to be served.
    fn adopt(&mut self, active: &ActiveModel) {
        self.config = active.model.classifier_config();
        self.tokenizer = active.tokenizer.clone();
    }
}

/// Trains on labeled documents and ranks the likely authors of new ones.
///
/// Training and loading are serialized: the setup mutex is held from the
/// start of a fit until its model is installed, so the last call to return
/// is the one whose model is served. Classification only takes the read
/// side of the model lock and never waits for training.
#[derive(Debug)]
pub struct AuthorClassifier {
    setup: Mutex<TrainingSetup>,
    active: RwLock<Option<Arc<ActiveModel>>>,
}

impl Default for AuthorClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default()).expect("Default configuration should be valid")
    }
}

impl AuthorClassifier {
    /// Create an untrained classifier.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.training.validate()?;
        let tokenizer = Tokenizer::new(config.tokenizer.clone())?;

        Ok(AuthorClassifier {
            setup: Mutex::new(TrainingSetup { config, tokenizer }),
            active: RwLock::new(None),
        })
    }

    /// Create a classifier serving an already trained model.
    ///
    /// The configuration is taken from the model, including its smoothing
    /// and vocabulary cap, so that retraining preprocesses text the same way.
    pub fn from_model(model: TrainedModel) -> Result<Self> {
        let active = ActiveModel::new(model)?;
        let setup = TrainingSetup {
            config: active.model.classifier_config(),
            tokenizer: active.tokenizer.clone(),
        };

        Ok(AuthorClassifier {
            setup: Mutex::new(setup),
            active: RwLock::new(Some(Arc::new(active))),
        })
    }

    /// Create a classifier from a model previously written with [`save`](Self::save).
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        Self::from_model(read_model(reader)?)
    }

    /// Create a classifier from a model file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::from_reader(&mut reader)
    }

    /// The configuration the next [`train`](Self::train) will use.
    ///
    /// After a successful [`load`](Self::load) this is the loaded model's
    /// configuration.
    pub fn config(&self) -> ClassifierConfig {
        self.setup.lock().config.clone()
    }

    /// Check whether a model is available.
    pub fn is_trained(&self) -> bool {
        self.active.read().is_some()
    }

    /// The current model, if any.
    pub fn model(&self) -> Option<Arc<TrainedModel>> {
        self.active
            .read()
            .as_ref()
            .map(|active| Arc::clone(&active.model))
    }

    /// Known labels in lexicographic order, or an empty list when untrained.
    pub fn labels(&self) -> Vec<String> {
        self.model()
            .map(|model| model.labels().to_vec())
            .unwrap_or_default()
    }

    fn snapshot(&self) -> Result<Arc<ActiveModel>> {
        self.active.read().clone().ok_or_else(|| {
            PenmarkError::state("classifier has no trained model; train or load one first")
        })
    }

    fn install(&self, active: ActiveModel) {
        let model_id = active.model.metadata().model_id;
        let previous = self.active.write().replace(Arc::new(active));
        info!(
            %model_id,
            replaced = previous.is_some(),
            "Installed model"
        );
    }

    /// Train a new model on `documents`, replacing any current model.
    ///
    /// Every document needs a label and at least two distinct labels must
    /// appear. On error the current model is left untouched. Concurrent
    /// calls run one after another.
    pub fn train(&self, documents: &[Document]) -> Result<()> {
        let setup = self.setup.lock();
        let model = setup.fit(documents)?;
        self.install(ActiveModel::new(model)?);
        Ok(())
    }

    /// Rank every known label for `document`.
    ///
    /// Any label on the document is ignored. Words outside the training
    /// vocabulary are skipped.
    pub fn classify(&self, document: &Document) -> Result<Classification> {
        self.snapshot()?.classify(document)
    }

    /// Rank every known label for raw `text`.
    pub fn classify_text(&self, text: &str) -> Result<Classification> {
        self.classify(&Document::new(text))
    }

    /// Classify several documents in parallel against one model snapshot.
    ///
    /// Results are returned in input order. The first failing document
    /// fails the whole batch.
    pub fn classify_batch(&self, documents: &[Document]) -> Result<Vec<Classification>> {
        let active = self.snapshot()?;
        debug!(documents = documents.len(), "Classifying batch");
        documents
            .par_iter()
            .map(|doc| active.classify(doc))
            .collect()
    }

    /// Write the current model to `writer`, returning the bytes written.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<u64> {
        let model = self.model_to_save()?;
        write_model(&model, writer)
    }

    fn model_to_save(&self) -> Result<Arc<TrainedModel>> {
        self.model()
            .ok_or_else(|| PenmarkError::state("classifier has no trained model to save"))
    }

    /// Replace the current model with one read from `reader`.
    ///
    /// The classifier also takes over the model's configuration, so a later
    /// [`train`](Self::train) uses the same tokenizer, smoothing and
    /// vocabulary cap. A corrupted stream leaves the current model and
    /// configuration in place.
    pub fn load<R: Read>(&self, reader: &mut R) -> Result<()> {
        let mut setup = self.setup.lock();
        let active = ActiveModel::new(read_model(reader)?)?;
        setup.adopt(&active);
        self.install(active);
        Ok(())
    }

    /// Write the current model to a file at `path`.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<u64> {
        let path = path.as_ref();
        let model = self.model_to_save()?;
        let mut writer = BufWriter::new(File::create(path)?);
        let written = write_model(&model, &mut writer)?;
        info!(path = %path.display(), bytes = written, "Saved model");
        Ok(written)
    }

    /// Replace the current model with one read from the file at `path`.
    pub fn load_from_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        self.load(&mut reader)?;
        info!(path = %path.display(), "Loaded model");
        Ok(())
    }
}
