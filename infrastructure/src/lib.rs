//! Infrastructure layer for the-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod artifact;
pub mod config;
pub mod embedding;
pub mod openai;

// Re-export commonly used types
pub use artifact::FileArtifactSink;
pub use config::{
    ConfigError, ConfigLoader, CredentialResolver, EmbeddingProvider, EnvCredentialResolver,
    FileConfig, MapCredentialResolver, ResolvedConfig,
};
pub use embedding::{LocalEmbedder, OllamaEmbedder};
pub use openai::OpenAiCompatibleGateway;
