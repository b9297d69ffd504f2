//! Binary persistence format for trained models.
//!
//! A persisted model is laid out as:
//!
//! ```text
//! +--------+-----------+----------------+-------------------+------------+
//! | "PNMK" | version   | payload length | payload (bincode) | CRC32      |
//! | 4 B    | u16 LE    | u64 LE         | length bytes      | u32 LE     |
//! +--------+-----------+----------------+-------------------+------------+
//! ```
//!
//! The payload is a [`ModelRecord`]: exactly the fields of a trained model
//! plus the tokenizer configuration that produced it. Reading checks the
//! magic, version, length, checksum, and the internal consistency of the
//! record before a model is returned.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::TokenizerConfig;
use crate::error::{PenmarkError, Result};
use crate::feature::Vocabulary;
use crate::model::naive_bayes::{ModelMetadata, TrainedModel};

/// File magic.
pub const MAGIC: &[u8; 4] = b"PNMK";

/// Current format version.
pub const FORMAT_VERSION: u16 = 1;

/// Serialized form of a [`TrainedModel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    pub model_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub document_count: u64,
    pub class_document_counts: Vec<u64>,
    pub smoothing: f64,
    pub max_vocabulary_size: Option<u64>,
    pub tokenizer: TokenizerConfig,
    /// Vocabulary terms in index order.
    pub terms: Vec<String>,
    /// Labels in lexicographic order.
    pub labels: Vec<String>,
    pub log_priors: Vec<f64>,
    pub log_likelihoods: Vec<Vec<f64>>,
}

impl From<&TrainedModel> for ModelRecord {
    fn from(model: &TrainedModel) -> Self {
        let metadata = model.metadata();
        ModelRecord {
            model_id: metadata.model_id,
            trained_at: metadata.trained_at,
            document_count: metadata.document_count as u64,
            class_document_counts: metadata
                .class_document_counts
                .iter()
                .map(|&n| n as u64)
                .collect(),
            smoothing: metadata.smoothing,
            max_vocabulary_size: metadata.max_vocabulary_size.map(|n| n as u64),
            tokenizer: model.tokenizer_config().clone(),
            terms: model.vocabulary().terms().to_vec(),
            labels: model.labels().to_vec(),
            log_priors: model.log_priors().to_vec(),
            log_likelihoods: model.log_likelihoods().to_vec(),
        }
    }
}

impl ModelRecord {
    /// Validate the record and turn it into a model.
    pub fn into_model(self) -> Result<TrainedModel> {
        let classes = self.labels.len();
        if classes < 2 {
            return Err(PenmarkError::serialization(format!(
                "model record has {classes} labels, expected at least 2"
            )));
        }
        if self.labels.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(PenmarkError::serialization(
                "model record labels are not unique and sorted",
            ));
        }
        if self.log_priors.len() != classes
            || self.log_likelihoods.len() != classes
            || self.class_document_counts.len() != classes
        {
            return Err(PenmarkError::serialization(format!(
                "model record has {classes} labels but {} priors, {} likelihood rows, {} class counts",
                self.log_priors.len(),
                self.log_likelihoods.len(),
                self.class_document_counts.len()
            )));
        }
        if self.terms.is_empty() {
            return Err(PenmarkError::serialization("model record has an empty vocabulary"));
        }
        let dimension = self.terms.len();
        if let Some(row) = self.log_likelihoods.iter().position(|r| r.len() != dimension) {
            return Err(PenmarkError::serialization(format!(
                "likelihood row {row} has {} entries, expected {dimension}",
                self.log_likelihoods[row].len()
            )));
        }
        let all_finite = self.log_priors.iter().all(|v| v.is_finite())
            && self
                .log_likelihoods
                .iter()
                .all(|row| row.iter().all(|v| v.is_finite()));
        if !all_finite {
            return Err(PenmarkError::serialization(
                "model record contains non-finite probabilities",
            ));
        }
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(PenmarkError::serialization(format!(
                "model record has invalid smoothing {}",
                self.smoothing
            )));
        }
        if let Some(max) = self.max_vocabulary_size
            && (max == 0 || dimension as u64 > max)
        {
            return Err(PenmarkError::serialization(format!(
                "model record has {dimension} terms but a vocabulary limit of {max}"
            )));
        }

        let vocabulary = Vocabulary::from_terms(self.terms)?;
        let metadata = ModelMetadata {
            model_id: self.model_id,
            trained_at: self.trained_at,
            document_count: self.document_count as usize,
            class_document_counts: self
                .class_document_counts
                .into_iter()
                .map(|n| n as usize)
                .collect(),
            smoothing: self.smoothing,
            max_vocabulary_size: self.max_vocabulary_size.map(|n| n as usize),
        };

        Ok(TrainedModel::from_parts(
            metadata,
            self.tokenizer,
            vocabulary,
            self.labels,
            self.log_priors,
            self.log_likelihoods,
        ))
    }
}

/// Write `model` to `writer`, returning the number of bytes written.
pub fn write_model<W: Write>(model: &TrainedModel, writer: &mut W) -> Result<u64> {
    let record = ModelRecord::from(model);
    let payload = bincode::serialize(&record).map_err(|e| {
        PenmarkError::serialization(format!("Failed to serialize model record: {e}"))
    })?;
    let checksum = crc32fast::hash(&payload);

    writer.write_all(MAGIC)?;
    writer.write_u16::<LittleEndian>(FORMAT_VERSION)?;
    writer.write_u64::<LittleEndian>(payload.len() as u64)?;
    writer.write_all(&payload)?;
    writer.write_u32::<LittleEndian>(checksum)?;
    writer.flush()?;

    let written = (MAGIC.len() + 2 + 8 + payload.len() + 4) as u64;
    debug!(
        model_id = %record.model_id,
        bytes = written,
        "Wrote model"
    );
    Ok(written)
}

/// Read a model previously written by [`write_model`].
pub fn read_model<R: Read>(reader: &mut R) -> Result<TrainedModel> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(truncated)?;
    if &magic != MAGIC {
        return Err(PenmarkError::serialization(format!(
            "not a penmark model (magic {magic:?})"
        )));
    }

    let version = reader.read_u16::<LittleEndian>().map_err(truncated)?;
    if version != FORMAT_VERSION {
        return Err(PenmarkError::serialization(format!(
            "unsupported model format version {version}, expected {FORMAT_VERSION}"
        )));
    }

    let length = reader.read_u64::<LittleEndian>().map_err(truncated)?;
    let mut payload = Vec::new();
    reader.by_ref().take(length).read_to_end(&mut payload)?;
    if payload.len() as u64 != length {
        return Err(PenmarkError::serialization(format!(
            "model payload truncated: expected {length} bytes, got {}",
            payload.len()
        )));
    }

    let expected = reader.read_u32::<LittleEndian>().map_err(truncated)?;
    let actual = crc32fast::hash(&payload);
    if expected != actual {
        return Err(PenmarkError::serialization(format!(
            "model checksum mismatch: stored {expected:#010x}, computed {actual:#010x}"
        )));
    }

    let record: ModelRecord = bincode::deserialize(&payload).map_err(|e| {
        PenmarkError::serialization(format!("Failed to deserialize model record: {e}"))
    })?;
    debug!(model_id = %record.model_id, bytes = length, "Read model");
    record.into_model()
}

fn truncated(e: io::Error) -> PenmarkError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        PenmarkError::serialization("model data is truncated")
    } else {
        PenmarkError::Io(e)
    }
}
