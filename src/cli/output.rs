//! Output formatting for CLI commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PenmarkArgs};
use crate::error::Result;
use crate::model::{LabelProbability, TrainedModel};

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub model_path: String,
    pub model_id: String,
    pub documents: usize,
    pub labels: usize,
    pub vocabulary_size: usize,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

/// Ranked labels for one classified file.
#[derive(Debug, Serialize, Deserialize)]
pub struct FileClassification {
    pub file: String,
    pub ranking: Vec<LabelProbability>,
}

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResults {
    pub results: Vec<FileClassification>,
    pub duration_ms: u64,
}

/// Documents seen for one label during training.
#[derive(Debug, Serialize, Deserialize)]
pub struct LabelSummary {
    pub label: String,
    pub documents: usize,
    pub prior: f64,
}

/// Model metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelSummary {
    pub model_id: String,
    pub trained_at: DateTime<Utc>,
    pub documents: usize,
    pub smoothing: f64,
    pub token_pattern: String,
    pub lowercase: bool,
    pub vocabulary_size: usize,
    pub labels: Vec<LabelSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<String>>,
}

impl ModelSummary {
    pub fn from_model(model: &TrainedModel, include_terms: bool) -> Self {
        let metadata = model.metadata();
        let labels = model
            .labels()
            .iter()
            .zip(&metadata.class_document_counts)
            .zip(model.log_priors())
            .map(|((label, &documents), prior)| LabelSummary {
                label: label.clone(),
                documents,
                prior: prior.exp(),
            })
            .collect();

        ModelSummary {
            model_id: metadata.model_id.to_string(),
            trained_at: metadata.trained_at,
            documents: metadata.document_count,
            smoothing: metadata.smoothing,
            token_pattern: model.tokenizer_config().pattern.clone(),
            lowercase: model.tokenizer_config().lowercase,
            vocabulary_size: model.vocabulary().len(),
            labels,
            terms: include_terms.then(|| model.vocabulary().terms().to_vec()),
        }
    }
}

/// Output a training result in the specified format.
pub fn output_training(result: &TrainingResult, args: &PenmarkArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("Model trained successfully");
                println!();
            }
            println!("Model: {}", result.model_path);
            println!("Model ID: {}", result.model_id);
            println!("Documents: {}", result.documents);
            println!("Labels: {}", result.labels);
            println!("Vocabulary size: {}", result.vocabulary_size);
            if args.verbosity() > 1 {
                println!("Size: {}", format_bytes(result.bytes_written));
                println!("Training time: {}ms", result.duration_ms);
            }
            Ok(())
        }
    }
}

/// Output classification results in the specified format.
pub fn output_classifications(results: &ClassificationResults, args: &PenmarkArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(results, args),
        OutputFormat::Human => {
            for (i, entry) in results.results.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}:", entry.file);
                for rank in &entry.ranking {
                    println!("  {}: {:.1}%", rank.label, rank.probability * 100.0);
                }
            }
            if args.verbosity() > 1 {
                println!();
                println!("Classification time: {}ms", results.duration_ms);
            }
            Ok(())
        }
    }
}

/// Output model metadata in the specified format.
pub fn output_model_summary(summary: &ModelSummary, args: &PenmarkArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(summary, args),
        OutputFormat::Human => {
            println!("Model Summary:");
            println!("══════════════");
            println!("Model ID: {}", summary.model_id);
            println!("Trained at: {}", summary.trained_at.to_rfc3339());
            println!("Documents: {}", summary.documents);
            println!("Smoothing: {}", summary.smoothing);
            println!("Token pattern: {}", summary.token_pattern);
            println!("Lowercase: {}", summary.lowercase);
            println!("Vocabulary size: {}", summary.vocabulary_size);
            println!();
            println!("Labels:");
            println!("───────");
            for label in &summary.labels {
                println!(
                    "  {} ({} documents, prior {:.1}%)",
                    label.label,
                    label.documents,
                    label.prior * 100.0
                );
            }
            if let Some(terms) = &summary.terms {
                println!();
                println!("Terms:");
                println!("──────");
                for term in terms {
                    println!("  {term}");
                }
            }
            Ok(())
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PenmarkArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Format a byte count with a binary unit.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
