//! Token budgets for the shared context.
//!
//! [`ContextBudget`] bounds how much compounded context is rendered into
//! each agent's prompt and how long the compression summaries may be.
//! Without it the context grows with every agent and eventually crowds the
//! seed idea out of the model's attention.

use serde::{Deserialize, Serialize};

/// Budget controlling shared-context size.
///
/// Two knobs:
/// - `max_tokens`: ceiling for the shared context after every mutation
/// - `summary_max_tokens`: completion ceiling for compression summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBudget {
    max_tokens: usize,
    summary_max_tokens: u32,
}

impl ContextBudget {
    pub fn new(max_tokens: usize, summary_max_tokens: u32) -> Self {
        Self {
            max_tokens,
            summary_max_tokens,
        }
    }

    /// Generous preset for large-context models.
    pub fn generous() -> Self {
        Self::new(12_000, 1_500)
    }

    /// Strict preset for cost-sensitive runs.
    pub fn strict() -> Self {
        Self::new(1_000, 200)
    }

    // ==================== Accessors ====================

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn summary_max_tokens(&self) -> u32 {
        self.summary_max_tokens
    }

    // ==================== Builder Methods ====================

    pub fn with_max_tokens(mut self, tokens: usize) -> Self {
        self.max_tokens = tokens;
        self
    }

    pub fn with_summary_max_tokens(mut self, tokens: u32) -> Self {
        self.summary_max_tokens = tokens;
        self
    }

    // ==================== Validation ====================

    /// Validate this budget, returning a list of issues.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.max_tokens == 0 {
            issues.push("context: max_tokens must be > 0".to_string());
        }
        if self.summary_max_tokens == 0 {
            issues.push("context: summary_max_tokens must be > 0".to_string());
        }
        issues
    }
}

impl Default for ContextBudget {
    /// Default: 3000 context tokens, 500-token summaries.
    fn default() -> Self {
        Self::new(3_000, 500)
    }
}
