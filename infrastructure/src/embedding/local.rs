use async_trait::async_trait;
use council_application::ports::embedding::{EmbeddingError, EmbeddingGateway};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::task;
use tracing::{debug, info};

/// In-process sentence embeddings (all-MiniLM-L6-v2 via fastembed).
///
/// The model is downloaded and loaded on the first embedding request, so
/// constructing the embedder is free and runs that never deduplicate never
/// touch the model.
#[derive(Clone)]
pub struct LocalEmbedder {
    model: Arc<OnceCell<Arc<TextEmbedding>>>,
    cache_dir: Option<PathBuf>,
}

impl LocalEmbedder {
    pub fn new() -> Self {
        Self {
            model: Arc::new(OnceCell::new()),
            cache_dir: dirs::cache_dir().map(|dir| dir.join("the-council").join("fastembed")),
        }
    }

    /// Where model files are cached; fastembed's default when `None`.
    pub fn with_cache_dir(mut self, cache_dir: Option<PathBuf>) -> Self {
        self.cache_dir = cache_dir;
        self
    }

    pub fn cache_dir(&self) -> Option<&PathBuf> {
        self.cache_dir.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    async fn get_model(&self) -> Result<Arc<TextEmbedding>, EmbeddingError> {
        let cache_dir = self.cache_dir.clone();
        let model = self
            .model
            .get_or_try_init(|| async move {
                task::spawn_blocking(move || {
                    let mut options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
                        .with_show_download_progress(false);
                    if let Some(dir) = cache_dir {
                        options = options.with_cache_dir(dir);
                    }
                    let model = TextEmbedding::try_new(options)
                        .map_err(|e| EmbeddingError::ModelUnavailable(e.to_string()))?;
                    info!("Embedding model loaded (AllMiniLML6V2)");
                    Ok::<_, EmbeddingError>(Arc::new(model))
                })
                .await
                .map_err(|e| EmbeddingError::ModelUnavailable(e.to_string()))?
            })
            .await?;
        Ok(Arc::clone(model))
    }
}

impl Default for LocalEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingGateway for LocalEmbedder {
    /// Runs on a blocking thread; inference is CPU-bound.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let model = self.get_model().await?;
        let text = text.to_string();
        let chars = text.len();

        let embedding = task::spawn_blocking(move || {
            model
                .embed(vec![text], None)
                .map_err(|e| EmbeddingError::RequestFailed(e.to_string()))?
                .into_iter()
                .next()
                .ok_or_else(|| EmbeddingError::InvalidResponse("no embedding returned".to_string()))
        })
        .await
        .map_err(|e| EmbeddingError::RequestFailed(e.to_string()))??;

        debug!("Embedded {} chars into {} dims", chars, embedding.len());
        Ok(embedding)
    }

    fn name(&self) -> &str {
        "fastembed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_does_not_load_model() {
        let embedder = LocalEmbedder::new();
        assert!(!embedder.is_loaded());
        assert_eq!(embedder.name(), "fastembed");
    }

    #[test]
    fn test_cache_dir_override() {
        let dir = PathBuf::from("/tmp/council-models");
        let embedder = LocalEmbedder::new().with_cache_dir(Some(dir.clone()));
        assert_eq!(embedder.cache_dir(), Some(&dir));

        let embedder = embedder.with_cache_dir(None);
        assert!(embedder.cache_dir().is_none());
    }

    #[test]
    fn test_clones_share_the_model_cell() {
        let embedder = LocalEmbedder::new();
        let clone = embedder.clone();
        assert!(Arc::ptr_eq(&embedder.model, &clone.model));
    }
}
