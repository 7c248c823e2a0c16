//! Synthesize Document use case
//!
//! Splits an existing document into line-aligned chunks, synthesizes the
//! chunks concurrently with a bounded worker pool, deduplicates the results
//! and runs one final synthesis pass over their concatenation.

use super::deduplicate::SemanticDeduplicator;
use super::inference::{InferenceError, InferenceGateway};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use council_domain::{
    AgentSpec, Document, HeuristicEstimator, PromptTemplate, Roster, TokenEstimator,
    split_into_chunks,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Name of the agent that performs synthesis unless configured otherwise
pub const DEFAULT_SYNTHESIZER: &str = "Overmind";
/// Heading of the single section a synthesized document carries
pub const SYNTHESIS_HEADING: &str = "Synthesis";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("Synthesizer agent '{0}' is not in the roster")]
    SynthesizerNotFound(String),

    #[error("Document to synthesize is empty")]
    EmptyDocument,

    #[error("Concurrency must be >= 1")]
    InvalidConcurrency,

    #[error("All {0} chunks failed to synthesize")]
    AllChunksFailed(usize),

    #[error("Final synthesis failed: {0}")]
    FinalPass(#[source] InferenceError),
}

/// Input for the SynthesizeDocument use case
#[derive(Debug, Clone)]
pub struct SynthesizeInput {
    pub source: String,
    pub synthesizer: AgentSpec,
    pub title: String,
    pub chunk_max_tokens: usize,
    pub concurrency: usize,
    pub max_tokens: u32,
    pub enable_deduplication: bool,
}

impl SynthesizeInput {
    pub fn new(source: impl Into<String>, synthesizer: AgentSpec) -> Self {
        Self {
            source: source.into(),
            synthesizer,
            title: "Synthesized Document".to_string(),
            chunk_max_tokens: 4_000,
            concurrency: 5,
            max_tokens: 4_000,
            enable_deduplication: true,
        }
    }

    /// Pick the synthesizer from `roster` by name.
    pub fn from_roster(
        source: impl Into<String>,
        roster: &Roster,
        synthesizer: &str,
    ) -> Result<Self, SynthesisError> {
        let agent = roster
            .find(synthesizer)
            .ok_or_else(|| SynthesisError::SynthesizerNotFound(synthesizer.to_string()))?;
        Ok(Self::new(source, agent.clone()))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_chunk_max_tokens(mut self, tokens: usize) -> Self {
        self.chunk_max_tokens = tokens;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }

    pub fn without_deduplication(mut self) -> Self {
        self.enable_deduplication = false;
        self
    }
}

#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    pub document: Document,
    pub chunk_count: usize,
    /// Chunks that came back successfully
    pub synthesized_count: usize,
    /// Fragments left after deduplication
    pub merged_count: usize,
    pub duration_ms: u64,
}

pub struct SynthesizeDocumentUseCase {
    inference: InferenceGateway,
    estimator: Arc<dyn TokenEstimator>,
    deduplicator: Option<SemanticDeduplicator>,
}

impl SynthesizeDocumentUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            inference: InferenceGateway::new(gateway),
            estimator: Arc::new(HeuristicEstimator::default()),
            deduplicator: None,
        }
    }

    pub fn with_estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_deduplicator(mut self, deduplicator: SemanticDeduplicator) -> Self {
        self.deduplicator = Some(deduplicator);
        self
    }

    pub async fn execute(&self, input: SynthesizeInput) -> Result<SynthesisOutput, SynthesisError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: SynthesizeInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<SynthesisOutput, SynthesisError> {
        if input.source.trim().is_empty() {
            return Err(SynthesisError::EmptyDocument);
        }
        if input.concurrency == 0 {
            return Err(SynthesisError::InvalidConcurrency);
        }

        let started = Instant::now();
        let chunks = split_into_chunks(
            &input.source,
            input.chunk_max_tokens,
            self.estimator.as_ref(),
        );
        let chunk_count = chunks.len();
        info!(
            "Synthesizing {} chunks with {} (concurrency {})",
            chunk_count,
            input.synthesizer.name(),
            input.concurrency
        );
        progress.on_synthesis_start(chunk_count);

        let synthesized = self.synthesize_chunks(&input, chunks, progress).await;
        if synthesized.is_empty() {
            return Err(SynthesisError::AllChunksFailed(chunk_count));
        }
        let synthesized_count = synthesized.len();

        let merged = match &self.deduplicator {
            Some(dedup) if input.enable_deduplication => dedup.deduplicate(synthesized).await,
            _ => synthesized,
        };
        let merged_count = merged.len();

        let combined = merged.join("\n\n");
        let final_text = self
            .inference
            .invoke(
                input.synthesizer.binding(),
                &PromptTemplate::synthesize_chunk(&combined),
                input.max_tokens,
            )
            .await
            .map_err(SynthesisError::FinalPass)?;
        progress.on_synthesis_complete();

        let mut document = Document::new(input.title.clone());
        document.contribute(SYNTHESIS_HEADING, &final_text);

        Ok(SynthesisOutput {
            document,
            chunk_count,
            synthesized_count,
            merged_count,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Fan chunks out to at most `concurrency` in-flight calls and collect
    /// the successes in completion order. Failed chunks are dropped.
    async fn synthesize_chunks(
        &self,
        input: &SynthesizeInput,
        chunks: Vec<String>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<String> {
        let semaphore = Arc::new(Semaphore::new(input.concurrency));
        let mut join_set = JoinSet::new();

        for (index, chunk) in chunks.into_iter().enumerate() {
            let inference = self.inference.clone();
            let binding = input.synthesizer.binding().clone();
            let semaphore = Arc::clone(&semaphore);
            let max_tokens = input.max_tokens;

            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let result = inference
                    .invoke(
                        &binding,
                        &PromptTemplate::synthesize_chunk(&chunk),
                        max_tokens,
                    )
                    .await;
                (index, result)
            });
        }

        let mut synthesized = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, Ok(text))) => {
                    progress.on_chunk_complete(index, true);
                    synthesized.push(text);
                }
                Ok((index, Err(e))) => {
                    warn!("Chunk {} failed, dropping it: {}", index, e);
                    progress.on_chunk_complete(index, false);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }
        synthesized
    }
}
