//! Command implementations for the Penmark CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classifier::AuthorClassifier;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ClassifierConfig;
use crate::document::Document;
use crate::error::PenmarkError;

/// One entry of a corpus manifest.
///
/// Relative paths are resolved against the manifest's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub title: String,
    pub author: String,
    pub path: PathBuf,
}

/// Execute a CLI command.
pub fn execute_command(args: PenmarkArgs) -> anyhow::Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args, &args),
        Command::Classify(classify_args) => classify(classify_args, &args),
        Command::Inspect(inspect_args) => inspect(inspect_args, &args),
    }
}

/// Load the classifier configuration named on the command line, or the default.
pub fn load_config(args: &PenmarkArgs) -> anyhow::Result<ClassifierConfig> {
    match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration");
            ClassifierConfig::from_json_file(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))
        }
        None => Ok(ClassifierConfig::default()),
    }
}

/// Read a corpus manifest into deferred training documents.
pub fn load_manifest(path: &Path) -> anyhow::Result<Vec<Document>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let entries: Vec<ManifestEntry> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse manifest {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    Ok(entries
        .into_iter()
        .map(|entry| {
            let text_path = base.join(&entry.path);
            file_document(text_path)
                .with_title(entry.title)
                .with_label(entry.author)
        })
        .collect())
}

/// A document whose text is read from `path` when first needed.
fn file_document(path: PathBuf) -> Document {
    Document::deferred(move || {
        fs::read_to_string(&path).map_err(|e| {
            PenmarkError::source_text(format!("failed to read {}: {e}", path.display()))
        })
    })
}

/// Train a model from a manifest and save it.
fn train(args: &TrainArgs, cli_args: &PenmarkArgs) -> anyhow::Result<()> {
    if args.model.exists() && !args.force {
        bail!(
            "model file {} already exists. Use --force to overwrite.",
            args.model.display()
        );
    }

    let config = load_config(cli_args)?;
    let documents = load_manifest(&args.manifest)?;
    info!(
        manifest = %args.manifest.display(),
        documents = documents.len(),
        "Loaded corpus manifest"
    );

    let start_time = Instant::now();
    let classifier = AuthorClassifier::new(config)?;
    classifier.train(&documents).context("training failed")?;
    let bytes_written = classifier
        .save_to_path(&args.model)
        .with_context(|| format!("failed to write model {}", args.model.display()))?;
    let duration = start_time.elapsed();

    let model = classifier
        .model()
        .context("classifier has no model after training")?;
    output_training(
        &TrainingResult {
            model_path: args.model.to_string_lossy().to_string(),
            model_id: model.metadata().model_id.to_string(),
            documents: model.metadata().document_count,
            labels: model.labels().len(),
            vocabulary_size: model.vocabulary().len(),
            bytes_written,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )?;
    Ok(())
}

/// Classify text files against a saved model.
fn classify(args: &ClassifyArgs, cli_args: &PenmarkArgs) -> anyhow::Result<()> {
    let classifier = AuthorClassifier::open(&args.model)
        .with_context(|| format!("failed to load model {}", args.model.display()))?;

    let documents: Vec<Document> = args
        .files
        .iter()
        .map(|path| file_document(path.clone()).with_title(path.to_string_lossy()))
        .collect();

    let start_time = Instant::now();
    let rankings = classifier.classify_batch(&documents)?;
    let duration = start_time.elapsed();

    let results = args
        .files
        .iter()
        .zip(rankings)
        .map(|(path, classification)| {
            let mut ranking = classification.into_vec();
            if let Some(top) = args.top {
                ranking.truncate(top);
            }
            FileClassification {
                file: path.to_string_lossy().to_string(),
                ranking,
            }
        })
        .collect();

    output_classifications(
        &ClassificationResults {
            results,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )?;
    Ok(())
}

/// Print the metadata of a saved model.
fn inspect(args: &InspectArgs, cli_args: &PenmarkArgs) -> anyhow::Result<()> {
    let classifier = AuthorClassifier::open(&args.model)
        .with_context(|| format!("failed to load model {}", args.model.display()))?;
    let model = classifier.model().context("model file contained no model")?;

    output_model_summary(&ModelSummary::from_model(&model, args.terms), cli_args)?;
    Ok(())
}
