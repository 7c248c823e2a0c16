//! Semantic deduplication
//!
//! Embeds a list of fragments, finds pairs above a cosine threshold and
//! merges each pair into a single entry.

use crate::ports::embedding::{EmbeddingError, EmbeddingGateway};
use council_domain::{DEFAULT_SIMILARITY_THRESHOLD, SimilarityPair, find_pairs, merge_fragments};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct SemanticDeduplicator {
    embedder: Arc<dyn EmbeddingGateway>,
    threshold: f32,
}

impl SemanticDeduplicator {
    pub fn new(embedder: Arc<dyn EmbeddingGateway>) -> Self {
        Self {
            embedder,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// One embedding per fragment, in input order.
    pub async fn embed_all(&self, fragments: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            vectors.push(self.embedder.embed(fragment).await?);
        }
        Ok(vectors)
    }

    /// Pairs `(i, j)`, `i < j`, whose similarity strictly exceeds the threshold
    pub async fn similar_pairs(
        &self,
        fragments: &[String],
    ) -> Result<Vec<SimilarityPair>, EmbeddingError> {
        let vectors = self.embed_all(fragments).await?;
        Ok(find_pairs(&vectors, self.threshold))
    }

    /// Merge similar fragments. If embedding fails the input is returned
    /// unchanged.
    pub async fn deduplicate(&self, fragments: Vec<String>) -> Vec<String> {
        if fragments.len() < 2 {
            return fragments;
        }

        let pairs = match self.similar_pairs(&fragments).await {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!(
                    "Embedding with {} failed, skipping deduplication: {}",
                    self.embedder.name(),
                    e
                );
                return fragments;
            }
        };

        if pairs.is_empty() {
            debug!("No fragments above similarity {}", self.threshold);
            return fragments;
        }

        let merged = merge_fragments(&fragments, &pairs);
        info!(
            "Deduplicated {} fragments into {} ({} similar pairs)",
            fragments.len(),
            merged.len(),
            pairs.len()
        );
        merged
    }
}
