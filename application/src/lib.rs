//! Application layer for the-council
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use ports::{
    artifact_sink::{Artifact, ArtifactError, ArtifactSink},
    embedding::{EmbeddingError, EmbeddingGateway},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::context_manager::ContextManager;
pub use use_cases::deduplicate::SemanticDeduplicator;
pub use use_cases::inference::{InferenceError, InferenceGateway};
pub use use_cases::refinement::{RefinementEngine, Selection};
pub use use_cases::run_agent_task::{AgentError, AgentTaskRunner};
pub use use_cases::run_council::{
    FINAL_PRODUCT_HEADING, FINAL_REVIEW_HEADING, META_ANALYSIS_HEADING, RunCouncilError,
    RunCouncilInput, RunCouncilOutput, RunCouncilUseCase,
};
pub use use_cases::synthesize_document::{
    DEFAULT_SYNTHESIZER, SYNTHESIS_HEADING, SynthesisError, SynthesisOutput,
    SynthesizeDocumentUseCase, SynthesizeInput,
};
