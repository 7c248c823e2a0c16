//! Context manager
//!
//! Owns the [`SharedContext`] for one run: seeds it with the idea, keeps it
//! within the token budget, and folds each agent's summarized contribution
//! back in.

use super::inference::InferenceGateway;
use super::refinement::RefinementEngine;
use council_domain::{
    ContextBudget, Fragment, InferenceBinding, ModelId, PromptTemplate, SharedContext,
    TokenEstimator,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ContextManager {
    context: SharedContext,
    summarizer: RefinementEngine,
    summarizer_model: ModelId,
}

impl ContextManager {
    pub fn new(
        inference: InferenceGateway,
        budget: ContextBudget,
        estimator: Arc<dyn TokenEstimator>,
    ) -> Self {
        Self {
            context: SharedContext::new(budget.max_tokens(), estimator),
            summarizer: RefinementEngine::new(inference, budget.summary_max_tokens()),
            summarizer_model: ModelId::default_summarizer(),
        }
    }

    pub fn with_summarizer_model(mut self, model: ModelId) -> Self {
        self.summarizer_model = model;
        self
    }

    pub fn seed(&mut self, text: &str) {
        self.context.seed(text);
    }

    pub fn append(&mut self, text: &str) {
        self.context.append(text);
    }

    /// Re-truncate against a new budget.
    pub fn truncate(&mut self, budget: usize) {
        self.context.truncate(budget);
    }

    /// The current, already budgeted context text
    pub fn text(&self) -> &str {
        self.context.text()
    }

    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    /// Summarize `text` with the summarizer model under the summary token
    /// ceiling, using the caller's credential and endpoint.
    pub async fn summarize(&self, binding: &InferenceBinding, text: &str) -> Fragment {
        let summarizer = binding.with_model(self.summarizer_model.clone());
        self.summarizer.summarize(&summarizer, text).await
    }

    /// Fold an agent's contribution into the context as
    /// `"<agent>'s Contribution:\n<summary>"`.
    ///
    /// When summarization fails the raw contribution is folded instead; the
    /// budget still holds because every append truncates.
    pub async fn fold_contribution(
        &mut self,
        agent: &str,
        binding: &InferenceBinding,
        contribution: &str,
    ) -> Fragment {
        let summary = self.summarize(binding, contribution).await;
        if summary.is_degraded() {
            warn!(
                "Summarizing {}'s contribution failed, folding it unsummarized: {}",
                agent,
                summary.text()
            );
        }

        let folded = match &summary {
            Fragment::Generated(text) => text.as_str(),
            Fragment::Degraded(_) => contribution,
        };
        self.context
            .append(&PromptTemplate::contribution_entry(agent, folded));

        debug!(
            "Context now ~{} tokens across {} lines",
            self.context.token_estimate(),
            self.context.line_count()
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EchoGateway, binding, echo_of};
    use council_domain::{Credential, HeuristicEstimator};

    fn manager(gateway: EchoGateway, budget: ContextBudget) -> ContextManager {
        ContextManager::new(
            InferenceGateway::new(Arc::new(gateway)),
            budget,
            Arc::new(HeuristicEstimator::default()),
        )
    }

    #[tokio::test]
    async fn test_fold_appends_labelled_summary() {
        let mut cm = manager(EchoGateway::new(), ContextBudget::default());
        cm.seed("test game");

        let summary = cm
            .fold_contribution("Designer", &binding("gpt-4o"), "long contribution")
            .await;

        let expected = echo_of(&PromptTemplate::summarize("long contribution"));
        assert_eq!(summary, Fragment::generated(expected.clone()));
        assert_eq!(
            cm.text(),
            format!("test game\n\nDesigner's Contribution:\n{}", expected)
        );
    }

    #[tokio::test]
    async fn test_summary_uses_summarizer_model() {
        let echo = Arc::new(EchoGateway::new());
        let mut cm = ContextManager::new(
            InferenceGateway::new(echo.clone()),
            ContextBudget::default(),
            Arc::new(HeuristicEstimator::default()),
        )
        .with_summarizer_model(ModelId::new("tiny"));

        cm.fold_contribution("Designer", &binding("gpt-4o"), "text")
            .await;

        assert_eq!(echo.prompts_for("tiny").len(), 1);
        assert!(echo.prompts_for("gpt-4o").is_empty());
    }

    #[tokio::test]
    async fn test_summarize_is_one_summary_call() {
        let echo = Arc::new(EchoGateway::new());
        let cm = ContextManager::new(
            InferenceGateway::new(echo.clone()),
            ContextBudget::default(),
            Arc::new(HeuristicEstimator::default()),
        )
        .with_summarizer_model(ModelId::new("tiny"));

        let summary = cm.summarize(&binding("gpt-4o"), "a long design").await;

        let prompt = PromptTemplate::summarize("a long design");
        assert_eq!(echo.prompts_for("tiny"), vec![prompt.clone()]);
        assert_eq!(summary, Fragment::generated(echo_of(&prompt)));
    }

    #[tokio::test]
    async fn test_failed_summary_folds_raw_contribution() {
        let mut cm = manager(EchoGateway::new(), ContextBudget::default());
        cm.seed("idea");
        let unbound = InferenceBinding::new("gpt-4o", Credential::missing("MISSING_KEY"));

        let summary = cm.fold_contribution("Writer", &unbound, "raw text").await;

        assert!(summary.is_degraded());
        assert_eq!(cm.text(), "idea\n\nWriter's Contribution:\nraw text");
    }

    #[tokio::test]
    async fn test_fold_keeps_context_within_budget() {
        let budget = ContextBudget::default().with_max_tokens(20);
        let mut cm = manager(EchoGateway::new(), budget);
        cm.seed("the original idea line");

        for agent in ["A", "B", "C", "D"] {
            cm.fold_contribution(agent, &binding("gpt-4o"), "contribution")
                .await;
            assert!(cm.context().within_budget() || cm.context().line_count() == 1);
        }
        assert!(cm.text().contains("D's Contribution:"));
        assert!(!cm.text().contains("the original idea line"));
    }
}
