//! Progress notification port
//!
//! Defines the interface for reporting progress during a council run.

use council_domain::RunState;

/// Callback for progress updates during a council run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, log lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when the orchestrator enters a new state
    fn on_state_change(&self, state: &RunState);

    /// Called before each model call an agent makes
    fn on_agent_stage(&self, agent_index: usize, roster_size: usize, stage_label: &str);

    /// Called when an agent finishes, successfully or not
    fn on_agent_complete(&self, agent_index: usize, roster_size: usize, agent: &str, success: bool);

    // ==================== Synthesis Callbacks ====================

    /// Called when document synthesis starts fanning out chunks.
    fn on_synthesis_start(&self, _total_chunks: usize) {}

    /// Called as each chunk finishes, in completion order.
    fn on_chunk_complete(&self, _chunk_index: usize, _success: bool) {}

    /// Called when the final synthesis pass has returned.
    fn on_synthesis_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_state_change(&self, _state: &RunState) {}
    fn on_agent_stage(&self, _agent_index: usize, _roster_size: usize, _stage_label: &str) {}
    fn on_agent_complete(
        &self,
        _agent_index: usize,
        _roster_size: usize,
        _agent: &str,
        _success: bool,
    ) {
    }
}
