//! Provider configuration from TOML (`[provider]` section)

use council_domain::PromptTemplate;
use serde::{Deserialize, Serialize};

/// Default endpoint for agents without their own `base_url`
///
/// ```toml
/// [provider]
/// base_url = "https://api.openai.com/v1"
/// timeout_seconds = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub system_prompt: String,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_seconds: 120,
            system_prompt: PromptTemplate::default_system().to_string(),
        }
    }
}
