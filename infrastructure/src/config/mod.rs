//! Configuration file loading for the-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUNCIL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. Global: `~/.config/the-council/config.toml`
//! 5. Default values
//!
//! Secrets are never read from files: each agent names the environment
//! variable holding its key, resolved through a [`CredentialResolver`].

mod credentials;
mod error;
mod file_config;
mod loader;

pub use credentials::{CredentialResolver, EnvCredentialResolver, MapCredentialResolver};
pub use error::ConfigError;
pub use file_config::{
    EmbeddingProvider, FileAgentConfig, FileConfig, FileContextConfig, FileDeduplicationConfig,
    FileOutputConfig, FilePipelineConfig, FileProviderConfig, FileSynthesisConfig, ResolvedConfig,
};
pub use loader::ConfigLoader;
