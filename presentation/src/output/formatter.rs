//! Output formatter trait

use council_application::{RunCouncilOutput, SynthesisOutput};

/// Trait for formatting council results
pub trait OutputFormatter {
    /// Run summary with per-agent status
    fn format(&self, output: &RunCouncilOutput) -> String;

    /// Per-agent results as JSON
    fn format_json(&self, output: &RunCouncilOutput) -> String;

    /// Summary of a synthesis pass
    fn format_synthesis(&self, output: &SynthesisOutput) -> String;
}
