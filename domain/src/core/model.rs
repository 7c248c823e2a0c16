//! Model identifier value object

use serde::{Deserialize, Serialize};

/// Identifier of a model served by an inference endpoint (Value Object)
///
/// The council never interprets the identifier; it is passed through to the
/// gateway verbatim (`gpt-4o`, `gpt-4o-mini`, `llama3.1:8b`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Model used for context compaction when nothing else is configured
    pub fn default_summarizer() -> Self {
        Self::new("gpt-4o-mini")
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
