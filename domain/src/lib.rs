//! Domain layer for the-council
//!
//! This crate contains the core entities, value objects and pure algorithms.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council run drives an ordered [`Roster`] of specialist agents through a
//! staged pipeline (draft, refine, critique, synthesize). Each agent sees the
//! compounded [`SharedContext`] of the agents before it and produces an
//! [`AgentResult`]; the results are assembled into a structured [`Document`].
//!
//! ## Degraded fragments
//!
//! A failed model call never aborts a run. It becomes a
//! [`Fragment::Degraded`] whose text is an `Error: ...` marker and which flows
//! downstream like any other content.

pub mod agent;
pub mod context;
pub mod core;
pub mod dedup;
pub mod document;
pub mod orchestration;
pub mod prompt;

// Re-export commonly used types
pub use agent::{
    fragment::{ERROR_MARKER_PREFIX, Fragment, error_marker, is_error_marker},
    result::{AgentResult, AgentStatus, RunResults, Stage, StageOutput},
    roster::Roster,
    spec::{AgentSpec, Credential, InferenceBinding},
};
pub use context::{
    ContextBudget, HeuristicEstimator, SharedContext, TokenEstimator, split_into_chunks,
    truncate_to_budget,
};
pub use core::{error::DomainError, model::ModelId, string::preview};
pub use dedup::{
    DEFAULT_SIMILARITY_THRESHOLD, MERGE_SEPARATOR, SimilarityPair, cosine_similarity, find_pairs,
    merge_fragments,
};
pub use document::{Document, DocumentTemplate, Section, SectionId, TemplateSection};
pub use orchestration::{
    pipeline::{PipelineSettings, PipelineVariant, RefinementSettings},
    state::{AgentFailure, CouncilRun, RunState},
};
pub use prompt::PromptTemplate;
