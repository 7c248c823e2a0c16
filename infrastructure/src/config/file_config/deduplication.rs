//! Semantic deduplication configuration from TOML (`[deduplication]` section)

use super::super::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// In-process sentence embeddings (fastembed)
    #[default]
    Local,
    /// Ollama's embeddings endpoint
    Ollama,
}

/// ```toml
/// [deduplication]
/// enabled = true
/// threshold = 0.8
/// provider = "ollama"
/// ollama_host = "http://localhost:11434"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeduplicationConfig {
    pub enabled: bool,
    pub threshold: f32,
    pub provider: EmbeddingProvider,
    pub ollama_host: String,
    pub ollama_model: String,
}

impl Default for FileDeduplicationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: council_domain::DEFAULT_SIMILARITY_THRESHOLD,
            provider: EmbeddingProvider::default(),
            ollama_host: crate::embedding::DEFAULT_OLLAMA_HOST.to_string(),
            ollama_model: crate::embedding::DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

impl FileDeduplicationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-1.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::invalid(
                "deduplication.threshold",
                format!("{} is outside [-1, 1]", self.threshold),
            ));
        }
        Ok(())
    }
}
