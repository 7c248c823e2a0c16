//! Orchestration subdomain: pipeline shape and run state.
//!
//! - [`pipeline::PipelineVariant`] / [`pipeline::PipelineSettings`] - which
//!   stages each agent runs and how many rounds each refinement takes
//! - [`state::RunState`] / [`state::CouncilRun`] - the orchestrator state machine

pub mod pipeline;
pub mod state;
