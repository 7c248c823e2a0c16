//! Embedding adapters
//!
//! - [`LocalEmbedder`] - in-process all-MiniLM-L6-v2 via fastembed
//! - [`OllamaEmbedder`] - Ollama's `/api/embeddings` endpoint

mod local;
mod ollama;

pub use local::LocalEmbedder;
pub use ollama::{DEFAULT_OLLAMA_HOST, DEFAULT_OLLAMA_MODEL, OllamaEmbedder};
