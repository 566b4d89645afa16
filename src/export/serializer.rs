//! Model serialization utilities
//!
//! Persists fitted models inside a small envelope carrying metadata and an
//! integrity checksum, with a binary (bincode) or JSON payload encoding.

use crate::error::{Result, TitanicError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Serialization format for the model payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerializationFormat {
    /// Binary format using bincode (efficient)
    Binary,
    /// JSON format (portable, human-readable)
    Json,
}

impl Default for SerializationFormat {
    fn default() -> Self {
        SerializationFormat::Binary
    }
}

/// Model metadata stored alongside the payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name
    pub name: String,
    /// Model type
    pub model_type: String,
    /// Feature names
    pub feature_names: Vec<String>,
    /// Hyperparameters
    pub hyperparameters: HashMap<String, String>,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            name: "model".to_string(),
            model_type: "unknown".to_string(),
            feature_names: Vec::new(),
            hyperparameters: HashMap::new(),
        }
    }
}

impl ModelMetadata {
    /// Create new metadata with name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set model type
    pub fn with_model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = model_type.into();
        self
    }

    /// Set feature names
    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.feature_names = features;
        self
    }

    /// Set hyperparameters
    pub fn with_hyperparameters(mut self, params: HashMap<String, String>) -> Self {
        self.hyperparameters = params;
        self
    }
}

/// Serialized model envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedModel {
    /// Magic bytes for format detection
    pub magic: [u8; 4],
    /// Format version
    pub format_version: u32,
    /// Payload encoding
    pub format: SerializationFormat,
    /// Model metadata
    pub metadata: ModelMetadata,
    /// Serialized model data
    pub model_data: Vec<u8>,
    /// Checksum for integrity verification
    pub checksum: u64,
}

impl SerializedModel {
    /// Magic bytes for Titanic model files
    const MAGIC: [u8; 4] = [b'T', b'I', b'T', b'M'];
    /// Current format version
    const VERSION: u32 = 1;

    /// Create a new envelope around a payload
    pub fn new(metadata: ModelMetadata, model_data: Vec<u8>, format: SerializationFormat) -> Self {
        let checksum = Self::compute_checksum(&model_data);
        Self {
            magic: Self::MAGIC,
            format_version: Self::VERSION,
            format,
            metadata,
            model_data,
            checksum,
        }
    }

    /// Compute checksum using FNV-1a hash
    fn compute_checksum(data: &[u8]) -> u64 {
        const FNV_OFFSET: u64 = 14695981039346656037;
        const FNV_PRIME: u64 = 1099511628211;

        let mut hash = FNV_OFFSET;
        for byte in data {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }

    /// Verify checksum
    pub fn verify_checksum(&self) -> bool {
        Self::compute_checksum(&self.model_data) == self.checksum
    }
}

/// Save a model to a file, wrapping it in the envelope format
pub fn save_model<M: Serialize>(
    model: &M,
    metadata: &ModelMetadata,
    path: impl AsRef<Path>,
    format: SerializationFormat,
) -> Result<()> {
    let model_data = match format {
        SerializationFormat::Binary => bincode::serialize(model)
            .map_err(|e| TitanicError::SerializationError(format!("failed to serialize: {}", e)))?,
        SerializationFormat::Json => serde_json::to_vec(model)?,
    };

    let envelope = SerializedModel::new(metadata.clone(), model_data, format);
    let bytes = bincode::serialize(&envelope)
        .map_err(|e| TitanicError::SerializationError(format!("failed to serialize: {}", e)))?;

    fs::write(path.as_ref(), bytes)?;
    debug!(path = %path.as_ref().display(), model_type = %metadata.model_type, "model saved");
    Ok(())
}

/// Load a model from a file, verifying magic and checksum
pub fn load_model<M: DeserializeOwned>(path: impl AsRef<Path>) -> Result<(M, ModelMetadata)> {
    let bytes = fs::read(path.as_ref())?;

    let envelope: SerializedModel = bincode::deserialize(&bytes)
        .map_err(|e| TitanicError::SerializationError(format!("failed to deserialize: {}", e)))?;

    if envelope.magic != SerializedModel::MAGIC {
        return Err(TitanicError::SerializationError(
            "not a model file (bad magic bytes)".to_string(),
        ));
    }
    if !envelope.verify_checksum() {
        return Err(TitanicError::SerializationError(
            "model data corrupted (checksum mismatch)".to_string(),
        ));
    }

    let model = match envelope.format {
        SerializationFormat::Binary => bincode::deserialize(&envelope.model_data).map_err(|e| {
            TitanicError::SerializationError(format!("failed to deserialize: {}", e))
        })?,
        SerializationFormat::Json => serde_json::from_slice(&envelope.model_data)?,
    };

    debug!(path = %path.as_ref().display(), model_type = %envelope.metadata.model_type, "model loaded");
    Ok((model, envelope.metadata))
}
