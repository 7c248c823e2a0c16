//! Context subdomain: the shared text passed between agents and the
//! budgets that keep it bounded.
//!
//! - [`token::TokenEstimator`] - pluggable, deterministic token counting
//! - [`shared_context::SharedContext`] - append-then-truncate context buffer
//! - [`context_budget::ContextBudget`] - token ceilings for context and summaries
//! - [`chunking::split_into_chunks`] - line-aligned chunking under a token ceiling

pub mod chunking;
pub mod context_budget;
pub mod shared_context;
pub mod token;

pub use chunking::split_into_chunks;
pub use context_budget::ContextBudget;
pub use shared_context::{SharedContext, truncate_to_budget};
pub use token::{HeuristicEstimator, TokenEstimator};
