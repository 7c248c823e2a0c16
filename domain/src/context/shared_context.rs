//! Shared context buffer

use super::token::TokenEstimator;
use std::sync::Arc;

/// Drop the oldest lines of `text` until its estimate fits `budget`.
///
/// Never drops below a single line: a lone line that is still over budget
/// is returned as-is.
pub fn truncate_to_budget(text: &str, budget: usize, estimator: &dyn TokenEstimator) -> String {
    if estimator.estimate(text) <= budget {
        return text.to_string();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let mut start = 0;
    let mut current = text.to_string();
    while start + 1 < lines.len() && estimator.estimate(&current) > budget {
        start += 1;
        current = lines[start..].join("\n");
    }
    current
}

/// Ordered text buffer handed from agent to agent (Entity)
///
/// Every mutation is append-then-truncate-from-oldest, so after any call the
/// token estimate is within budget, or exactly one line remains.
#[derive(Clone)]
pub struct SharedContext {
    text: String,
    budget: usize,
    estimator: Arc<dyn TokenEstimator>,
}

impl SharedContext {
    pub fn new(budget: usize, estimator: Arc<dyn TokenEstimator>) -> Self {
        Self {
            text: String::new(),
            budget,
            estimator,
        }
    }

    /// Reset the buffer to `text`.
    pub fn seed(&mut self, text: &str) {
        self.text = text.to_string();
        self.enforce_budget();
    }

    /// Append `text` (most recent last), separated from existing content by
    /// a blank line.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push_str("\n\n");
        }
        self.text.push_str(text);
        self.enforce_budget();
    }

    /// Drop oldest lines until the estimate fits `budget`. The tighter budget
    /// also becomes the buffer's budget for later mutations.
    pub fn truncate(&mut self, budget: usize) {
        self.budget = budget;
        self.enforce_budget();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn token_estimate(&self) -> usize {
        self.estimator.estimate(&self.text)
    }

    pub fn line_count(&self) -> usize {
        if self.text.is_empty() {
            0
        } else {
            self.text.split('\n').count()
        }
    }

    /// Whether the buffer satisfies its invariant
    pub fn within_budget(&self) -> bool {
        self.token_estimate() <= self.budget || self.line_count() <= 1
    }

    fn enforce_budget(&mut self) {
        if self.token_estimate() > self.budget {
            self.text = truncate_to_budget(&self.text, self.budget, self.estimator.as_ref());
        }
    }
}

impl std::fmt::Debug for SharedContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedContext")
            .field("budget", &self.budget)
            .field("tokens", &self.token_estimate())
            .field("lines", &self.line_count())
            .finish()
    }
}
