//! Command line argument parsing for the Penmark CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Penmark - authorship attribution with naive Bayes
#[derive(Parser, Debug, Clone)]
#[command(name = "penmark")]
#[command(about = "Train authorship models and rank the likely authors of texts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PenmarkArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Classifier configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "PENMARK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PenmarkArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model from a corpus manifest
    Train(TrainArgs),

    /// Rank the likely authors of one or more text files
    Classify(ClassifyArgs),

    /// Show model metadata
    Inspect(InspectArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Corpus manifest: a JSON array of {"title", "author", "path"} entries
    #[arg(short, long, value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Where to write the trained model
    #[arg(short = 'o', long, value_name = "MODEL_PATH")]
    pub model: PathBuf,

    /// Overwrite an existing model file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Trained model file
    #[arg(short, long, value_name = "MODEL_PATH")]
    pub model: PathBuf,

    /// Text files to classify
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Show only the top N labels per file
    #[arg(short = 'n', long)]
    pub top: Option<usize>,
}

/// Arguments for model inspection
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Trained model file
    #[arg(short, long, value_name = "MODEL_PATH")]
    pub model: PathBuf,

    /// Also list the vocabulary terms
    #[arg(long)]
    pub terms: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
