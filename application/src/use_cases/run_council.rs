//! Run Council use case
//!
//! Orchestrates the full council flow: every agent in roster order against
//! the compounding shared context, then aggregation, meta-analysis, the
//! final product and an optional final review.

use super::context_manager::ContextManager;
use super::deduplicate::SemanticDeduplicator;
use super::inference::InferenceGateway;
use super::refinement::RefinementEngine;
use super::run_agent_task::AgentTaskRunner;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use council_domain::{
    AgentResult, AgentStatus, ContextBudget, CouncilRun, Document, DocumentTemplate, DomainError,
    Fragment, HeuristicEstimator, ModelId, PipelineSettings, PromptTemplate, Roster, RunResults,
    Stage, TokenEstimator,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info};

/// Heading of the section holding the cross-agent meta-analysis
pub const META_ANALYSIS_HEADING: &str = "Meta-Analysis";
/// Heading of the section holding every agent's strongest answer
pub const FINAL_PRODUCT_HEADING: &str = "Final Product";
/// Heading of the section holding the final review
pub const FINAL_REVIEW_HEADING: &str = "Final Review and Recommendations";

/// Errors that abort a council run. Agent failures are never among them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunCouncilError {
    #[error("Invalid run configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    /// The seed idea every agent builds on
    pub idea: String,
    pub roster: Roster,
    pub settings: PipelineSettings,
    pub budget: ContextBudget,
    pub template: DocumentTemplate,
    /// Whether to run the final review pass
    pub enable_final_review: bool,
    /// Whether to deduplicate the final product (needs a deduplicator)
    pub enable_deduplication: bool,
}

impl RunCouncilInput {
    pub fn new(idea: impl Into<String>, roster: Roster) -> Self {
        Self {
            idea: idea.into(),
            roster,
            settings: PipelineSettings::default(),
            budget: ContextBudget::default(),
            template: DocumentTemplate::game_design(),
            enable_final_review: true,
            enable_deduplication: true,
        }
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_budget(mut self, budget: ContextBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_template(mut self, template: DocumentTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn without_final_review(mut self) -> Self {
        self.enable_final_review = false;
        self
    }

    pub fn without_deduplication(mut self) -> Self {
        self.enable_deduplication = false;
        self
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunCouncilOutput {
    pub document: Document,
    pub results: RunResults,
    pub run: CouncilRun,
    pub meta_analysis: Fragment,
    pub final_review: Option<Fragment>,
    pub duration_ms: u64,
}

/// Use case for running a council
pub struct RunCouncilUseCase {
    inference: InferenceGateway,
    estimator: Arc<dyn TokenEstimator>,
    summarizer_model: ModelId,
    deduplicator: Option<SemanticDeduplicator>,
}

impl RunCouncilUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            inference: InferenceGateway::new(gateway),
            estimator: Arc::new(HeuristicEstimator::default()),
            summarizer_model: ModelId::default_summarizer(),
            deduplicator: None,
        }
    }

    pub fn with_estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_summarizer_model(mut self, model: ModelId) -> Self {
        self.summarizer_model = model;
        self
    }

    pub fn with_deduplicator(mut self, deduplicator: SemanticDeduplicator) -> Self {
        self.deduplicator = Some(deduplicator);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunCouncilInput) -> Result<RunCouncilOutput, RunCouncilError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunCouncilInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<RunCouncilOutput, RunCouncilError> {
        let started = Instant::now();
        let mut run = CouncilRun::new(input.roster.len());

        let mut document = match Self::prepare(&input) {
            Ok(document) => document,
            Err(e) => {
                error!("Run aborted before any agent ran: {}", e);
                run.fail_fatal(e.to_string())?;
                progress.on_state_change(run.state());
                return Err(e);
            }
        };

        run.start()?;
        progress.on_state_change(run.state());
        info!(
            "Starting council with {} agents ({} pipeline)",
            input.roster.len(),
            input.settings.variant
        );

        let engine = RefinementEngine::new(self.inference.clone(), input.settings.max_tokens)
            .with_history_limit(input.settings.refinement.history_limit);
        let runner = AgentTaskRunner::new(engine.clone(), input.settings);

        // Phase 1: agents in roster order over the compounding context
        let results = self.run_agents(&input, &runner, &mut run, progress).await?;

        // Phase 2: section assembly
        Self::assemble(&mut document, &input, &results);

        // Phase 3: meta-analysis by the last agent
        run.begin_meta_analysis()?;
        progress.on_state_change(run.state());
        let lead = input.roster.last();
        let contributions: Vec<(String, String)> = results
            .iter()
            .map(|r| (r.agent().to_string(), r.contribution()))
            .collect();
        let meta_analysis = engine
            .generate(lead.binding(), &PromptTemplate::meta_analysis(&contributions))
            .await;
        document.contribute(META_ANALYSIS_HEADING, &meta_analysis.text());

        let product = self.final_product(&input, &results).await;
        document.contribute(FINAL_PRODUCT_HEADING, &product);

        // Phase 4: final review over the assembled document
        run.begin_final_review()?;
        progress.on_state_change(run.state());
        let final_review = if input.enable_final_review {
            let review = engine
                .generate(
                    lead.binding(),
                    &PromptTemplate::final_review(&document.render_markdown()),
                )
                .await;
            document.contribute(FINAL_REVIEW_HEADING, &review.text());
            Some(review)
        } else {
            debug!("Skipping final review");
            None
        };

        run.finish()?;
        progress.on_state_change(run.state());

        let duration_ms = started.elapsed().as_millis() as u64;
        info!(
            "Council finished in {}ms ({} of {} agents failed)",
            duration_ms,
            run.failures().len(),
            run.roster_size()
        );

        Ok(RunCouncilOutput {
            document,
            results,
            run,
            meta_analysis,
            final_review,
            duration_ms,
        })
    }

    /// Configuration checks that must pass before any agent runs
    fn prepare(input: &RunCouncilInput) -> Result<Document, RunCouncilError> {
        input.settings.validate()?;

        let issues = input.budget.validate();
        if !issues.is_empty() {
            return Err(RunCouncilError::InvalidConfiguration(issues.join("; ")));
        }
        if input.idea.trim().is_empty() {
            return Err(RunCouncilError::InvalidConfiguration(
                "idea cannot be empty".to_string(),
            ));
        }

        Ok(input.template.instantiate(&input.idea)?)
    }

    async fn run_agents(
        &self,
        input: &RunCouncilInput,
        runner: &AgentTaskRunner,
        run: &mut CouncilRun,
        progress: &dyn ProgressNotifier,
    ) -> Result<RunResults, RunCouncilError> {
        let roster_size = input.roster.len();
        let mut context = ContextManager::new(
            self.inference.clone(),
            input.budget,
            Arc::clone(&self.estimator),
        )
        .with_summarizer_model(self.summarizer_model.clone());
        context.seed(&input.idea);

        let mut results = RunResults::new();

        for (index, agent) in input.roster.agents().iter().enumerate() {
            let snapshot = context.text().to_string();

            let result = match runner
                .run(agent, &snapshot, &input.roster, index, progress)
                .await
            {
                Ok(result) => result,
                Err(e) => {
                    error!("{}", e);
                    AgentResult::failed(
                        agent.name(),
                        e.to_string(),
                        &input.settings.variant.stages(),
                    )
                }
            };

            let failure = match result.status() {
                AgentStatus::Failed { reason } => Some(reason.clone()),
                AgentStatus::Completed => None,
            };

            context
                .fold_contribution(agent.name(), agent.binding(), &result.contribution())
                .await;

            run.agent_finished(agent.name(), failure.clone())?;
            progress.on_agent_complete(index, roster_size, agent.name(), failure.is_none());
            progress.on_state_change(run.state());
            results.push(result);
        }

        Ok(results)
    }

    /// Write each agent's section body into every section it owns, plus a
    /// per-agent peer review section when reviews were run.
    fn assemble(document: &mut Document, input: &RunCouncilInput, results: &RunResults) {
        for agent in input.roster.agents() {
            let Some(result) = results.get(agent.name()) else {
                continue;
            };

            let body = result.section_body();
            for section in agent.sections() {
                document.contribute(section, &body);
            }

            if input.settings.variant.runs_peer_review()
                && let Some(reviews) = result.text(Stage::PeerReviews)
            {
                document.contribute(&format!("Peer Reviews: {}", agent.name()), &reviews);
            }
        }
    }

    /// Every agent's strongest answer with its reflection and limitations,
    /// deduplicated when a deduplicator is configured.
    async fn final_product(&self, input: &RunCouncilInput, results: &RunResults) -> String {
        let fragments: Vec<String> = results
            .iter()
            .map(|result| {
                let mut entry = format!("### {}\n\n{}", result.agent(), result.contribution());
                for stage in [Stage::Reflection, Stage::Limitations] {
                    if let Some(text) = result.text(stage) {
                        entry.push_str(&format!("\n\n#### {}\n{}", stage.heading(), text));
                    }
                }
                entry
            })
            .collect();

        let fragments = match &self.deduplicator {
            Some(dedup) if input.enable_deduplication => dedup.deduplicate(fragments).await,
            _ => fragments,
        };
        fragments.join("\n\n")
    }
}
