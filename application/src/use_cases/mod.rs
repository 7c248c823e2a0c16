//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod context_manager;
pub mod deduplicate;
pub mod inference;
pub mod refinement;
pub mod run_agent_task;
pub mod run_council;
pub mod synthesize_document;
