//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod artifact_sink;
pub mod embedding;
pub mod llm_gateway;
pub mod progress;
