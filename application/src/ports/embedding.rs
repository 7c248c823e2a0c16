//! Embedding port
//!
//! Turns text into a fixed-length vector for similarity comparison.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while embedding text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmbeddingError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Embedding request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid embedding response: {0}")]
    InvalidResponse(String),
}

/// Provider of text embeddings
#[async_trait]
pub trait EmbeddingGateway: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Short name shown in logs
    fn name(&self) -> &str;
}
