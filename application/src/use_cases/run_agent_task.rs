//! Agent task runner
//!
//! Drives one agent through the stages of the configured pipeline variant.

use super::refinement::RefinementEngine;
use crate::ports::progress::ProgressNotifier;
use council_domain::{
    AgentResult, AgentSpec, Fragment, PipelineSettings, PipelineVariant, PromptTemplate, Roster,
    Stage,
};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Why an agent produced nothing usable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("Agent '{agent}' has no credential: {reference} is not set")]
    MissingCredential { agent: String, reference: String },

    #[error("Agent '{agent}' failed every stage: {reason}")]
    AllStagesFailed { agent: String, reason: String },
}

pub struct AgentTaskRunner {
    engine: RefinementEngine,
    settings: PipelineSettings,
}

impl AgentTaskRunner {
    pub fn new(engine: RefinementEngine, settings: PipelineSettings) -> Self {
        Self { engine, settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Run every stage of the pipeline for `agent` against the budgeted
    /// `context`. Individual stage failures are recorded as degraded
    /// fragments; only a missing credential or a completely degraded run is
    /// an error.
    pub async fn run(
        &self,
        agent: &AgentSpec,
        context: &str,
        roster: &Roster,
        agent_index: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<AgentResult, AgentError> {
        let binding = agent.binding();
        if !binding.credential.is_resolved() {
            return Err(AgentError::MissingCredential {
                agent: agent.name().to_string(),
                reference: binding.credential.reference().to_string(),
            });
        }

        let started = Instant::now();
        let roster_size = roster.len();
        let stage_label =
            |stage: Stage| progress.on_agent_stage(agent_index, roster_size, stage.heading());
        let rendered = agent.render_prompt(context);
        let variant = self.settings.variant;
        let refinement = self.settings.refinement;

        info!(
            "Agent {} ({}) starting {} pipeline",
            agent.name(),
            binding.model,
            variant
        );

        let mut result = AgentResult::new(agent.name());

        let structured: &[Stage] = match variant {
            PipelineVariant::Minimal => &[Stage::Overview],
            PipelineVariant::Standard | PipelineVariant::Full => &Stage::SECTION_STAGES,
        };
        for stage in structured {
            stage_label(*stage);
            let fragment = self
                .engine
                .generate(binding, &PromptTemplate::stage_prompt(&rendered, *stage))
                .await;
            result = result.with_stage(*stage, fragment);
        }

        if variant == PipelineVariant::Full {
            let overview = match result.stage(Stage::Overview).map(|o| o.fragments()) {
                Some([Fragment::Generated(text)]) => text.clone(),
                _ => rendered.clone(),
            };

            stage_label(Stage::ChainOfThought);
            let thoughts = self
                .engine
                .chain_of_thought(binding, &rendered, refinement.chain_of_thought_steps)
                .await;

            stage_label(Stage::Debate);
            let debate = self
                .engine
                .debate(binding, &overview, refinement.debate_rounds)
                .await;

            stage_label(Stage::ImprovedResponse);
            let improved = self
                .engine
                .iterative_improvement(binding, &overview, refinement.improvement_iterations)
                .await;

            stage_label(Stage::BestResponse);
            let selection = self
                .engine
                .sample_and_select(binding, &rendered, refinement.sample_count)
                .await;
            let best = selection.choice.text();

            stage_label(Stage::Reflection);
            let reflection = self.engine.reflect(binding, &best).await;

            stage_label(Stage::Limitations);
            let limitations = self.engine.limitations(binding, &best).await;

            stage_label(Stage::PeerReviews);
            let reviews = self
                .engine
                .peer_review(roster, &best, refinement.reviewer_count)
                .await;

            result = result
                .with_stage(Stage::ChainOfThought, thoughts)
                .with_stage(Stage::Debate, debate)
                .with_stage(Stage::ImprovedResponse, improved)
                .with_stage(Stage::BestResponse, selection.choice)
                .with_stage(Stage::Reflection, reflection)
                .with_stage(Stage::Limitations, limitations)
                .with_stage(Stage::PeerReviews, reviews);
        }

        let result = result.with_duration_ms(started.elapsed().as_millis() as u64);

        if let Some(reason) = Self::total_failure(&result) {
            return Err(AgentError::AllStagesFailed {
                agent: agent.name().to_string(),
                reason,
            });
        }

        let degraded = result.degraded_count();
        if degraded > 0 {
            warn!(
                "Agent {} finished with {} degraded fragments",
                agent.name(),
                degraded
            );
        } else {
            info!("Agent {} finished in {}ms", agent.name(), result.duration_ms());
        }
        Ok(result)
    }

    /// First failure reason when every stage run on the agent's own binding
    /// degraded. Peer reviews run on other agents' bindings and do not count.
    fn total_failure(result: &AgentResult) -> Option<String> {
        let own: Vec<&Fragment> = result
            .stages()
            .filter(|(stage, _)| **stage != Stage::PeerReviews)
            .flat_map(|(_, output)| output.fragments())
            .collect();

        if own.is_empty() || !own.iter().all(|f| f.is_degraded()) {
            return None;
        }
        own.iter().find_map(|f| match f {
            Fragment::Degraded(reason) => Some(reason.clone()),
            Fragment::Generated(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EchoGateway, RecordingProgress, agent, echo_of};
    use crate::use_cases::inference::InferenceGateway;
    use council_domain::{AgentStatus, Credential, InferenceBinding, RefinementSettings};
    use std::sync::Arc;

    fn runner(echo: Arc<EchoGateway>, variant: PipelineVariant) -> AgentTaskRunner {
        let settings = PipelineSettings::default().with_variant(variant);
        AgentTaskRunner::new(
            RefinementEngine::new(InferenceGateway::new(echo), settings.max_tokens),
            settings,
        )
    }

    fn roster_of(agents: Vec<AgentSpec>) -> Roster {
        Roster::new(agents).unwrap()
    }

    #[tokio::test]
    async fn test_standard_pipeline_fills_section_stages() {
        let echo = Arc::new(EchoGateway::new());
        let designer = agent("A", "gpt-4o", &["Overview"]);
        let roster = roster_of(vec![designer.clone()]);

        let result = runner(echo.clone(), PipelineVariant::Standard)
            .run(&designer, "test game", &roster, 0, &RecordingProgress::default())
            .await
            .unwrap();

        assert_eq!(result.status(), &AgentStatus::Completed);
        assert_eq!(echo.call_count(), 5);
        let rendered = designer.render_prompt("test game");
        assert_eq!(
            result.text(Stage::Overview),
            Some(echo_of(&PromptTemplate::stage_prompt(&rendered, Stage::Overview)))
        );
        for stage in Stage::SECTION_STAGES {
            assert!(result.stage(stage).is_some(), "missing {stage}");
        }
        assert!(result.stage(Stage::Debate).is_none());
    }

    #[tokio::test]
    async fn test_minimal_pipeline_only_overview() {
        let echo = Arc::new(EchoGateway::new());
        let designer = agent("A", "gpt-4o", &["Overview"]);
        let roster = roster_of(vec![designer.clone()]);

        let result = runner(echo.clone(), PipelineVariant::Minimal)
            .run(&designer, "idea", &roster, 0, &RecordingProgress::default())
            .await
            .unwrap();

        assert_eq!(echo.call_count(), 1);
        assert_eq!(result.stages().count(), 1);
    }

    #[tokio::test]
    async fn test_full_pipeline_produces_every_stage() {
        let echo = Arc::new(EchoGateway::new());
        let a = agent("A", "model-a", &["Overview"]);
        let b = agent("B", "model-b", &["Gameplay"]);
        let roster = roster_of(vec![a.clone(), b]);
        let progress = RecordingProgress::default();

        let result = runner(echo.clone(), PipelineVariant::Full)
            .run(&a, "idea", &roster, 0, &progress)
            .await
            .unwrap();

        let refinement = RefinementSettings::default();
        for stage in PipelineVariant::Full.stages() {
            assert!(result.stage(stage).is_some(), "missing {stage}");
        }
        assert_eq!(
            result.stage(Stage::ChainOfThought).unwrap().fragments().len(),
            refinement.chain_of_thought_steps
        );
        assert_eq!(
            result.stage(Stage::Debate).unwrap().fragments().len(),
            refinement.debate_rounds
        );
        assert_eq!(
            result.stage(Stage::PeerReviews).unwrap().fragments().len(),
            refinement.reviewer_count
        );
        // Reviews alternate between the roster's bindings.
        assert_eq!(echo.prompts_for("model-b").len(), 1);
        assert!(progress.stage_labels().contains(&"Peer Reviews".to_string()));
    }

    #[tokio::test]
    async fn test_missing_credential_is_agent_error() {
        let echo = Arc::new(EchoGateway::new());
        let unbound = AgentSpec::new(
            "B",
            InferenceBinding::new("gpt-4o", Credential::missing("B_API_KEY")),
            "{context}",
            vec!["Overview".to_string()],
        );
        let roster = roster_of(vec![unbound.clone()]);

        let err = runner(echo.clone(), PipelineVariant::Standard)
            .run(&unbound, "idea", &roster, 0, &RecordingProgress::default())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AgentError::MissingCredential {
                agent: "B".into(),
                reference: "B_API_KEY".into()
            }
        );
        assert_eq!(echo.call_count(), 0);
    }

    #[tokio::test]
    async fn test_every_stage_degraded_is_agent_error() {
        let echo = Arc::new(EchoGateway::new().failing_model("broken"));
        let broken = agent("B", "broken", &["Overview"]);
        let roster = roster_of(vec![broken.clone()]);

        let err = runner(echo, PipelineVariant::Standard)
            .run(&broken, "idea", &roster, 0, &RecordingProgress::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::AllStagesFailed { ref agent, .. } if agent == "B"));
    }

    #[tokio::test]
    async fn test_peer_reviews_do_not_rescue_failed_agent() {
        let echo = Arc::new(EchoGateway::new().failing_model("broken"));
        let broken = agent("B", "broken", &["Overview"]);
        let healthy = agent("A", "gpt-4o", &["Overview"]);
        let roster = roster_of(vec![healthy, broken.clone()]);

        let err = runner(echo, PipelineVariant::Full)
            .run(&broken, "idea", &roster, 1, &RecordingProgress::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::AllStagesFailed { .. }));
    }
}
