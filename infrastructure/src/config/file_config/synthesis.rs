//! Document synthesis configuration from TOML (`[synthesis]` section)

use super::super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// ```toml
/// [synthesis]
/// synthesizer = "Overmind"
/// chunk_max_tokens = 4000
/// concurrency = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSynthesisConfig {
    /// Name of the roster agent that performs synthesis
    pub synthesizer: String,
    pub chunk_max_tokens: usize,
    pub concurrency: usize,
    pub max_tokens: u32,
}

impl Default for FileSynthesisConfig {
    fn default() -> Self {
        Self {
            synthesizer: "Overmind".to_string(),
            chunk_max_tokens: 4_000,
            concurrency: 5,
            max_tokens: 4_000,
        }
    }
}

impl FileSynthesisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::invalid("synthesis.concurrency", "must be >= 1"));
        }
        if self.chunk_max_tokens == 0 {
            return Err(ConfigError::invalid(
                "synthesis.chunk_max_tokens",
                "must be > 0",
            ));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::invalid("synthesis.max_tokens", "must be > 0"));
        }
        Ok(())
    }
}
