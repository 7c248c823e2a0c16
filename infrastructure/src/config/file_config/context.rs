//! Context budget configuration from TOML (`[context]` section)

use super::super::error::ConfigError;
use council_domain::{ContextBudget, ModelId};
use serde::{Deserialize, Serialize};

/// Controls how large the shared context may grow and how it is compressed.
///
/// ```toml
/// [context]
/// max_tokens = 3000
/// summary_max_tokens = 500
/// summarizer_model = "gpt-4o-mini"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContextConfig {
    pub max_tokens: usize,
    pub summary_max_tokens: u32,
    pub summarizer_model: String,
}

impl Default for FileContextConfig {
    fn default() -> Self {
        let budget = ContextBudget::default();
        Self {
            max_tokens: budget.max_tokens(),
            summary_max_tokens: budget.summary_max_tokens(),
            summarizer_model: ModelId::default_summarizer().to_string(),
        }
    }
}

impl FileContextConfig {
    pub fn to_context_budget(&self) -> Result<ContextBudget, ConfigError> {
        let budget = ContextBudget::new(self.max_tokens, self.summary_max_tokens);
        let issues = budget.validate();
        if issues.is_empty() {
            Ok(budget)
        } else {
            Err(ConfigError::invalid("context", issues.join("; ")))
        }
    }

    pub fn summarizer_model(&self) -> Result<ModelId, ConfigError> {
        let model = ModelId::new(self.summarizer_model.trim());
        if model.is_empty() {
            return Err(ConfigError::invalid(
                "context.summarizer_model",
                "cannot be empty",
            ));
        }
        Ok(model)
    }
}
