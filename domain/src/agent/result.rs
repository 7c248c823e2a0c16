//! Per-agent and per-run result types
//!
//! - [`Stage`] - name of one step of an agent's workflow
//! - [`StageOutput`] - a single fragment or an ordered fragment sequence
//! - [`AgentResult`] - everything one agent produced in a run
//! - [`RunResults`] - all agent results of a run, in roster order

use super::fragment::{Fragment, error_marker};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named step in an agent's workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Overview,
    DetailedDesign,
    ImplementationConsiderations,
    PotentialChallenges,
    IntegrationPoints,
    ChainOfThought,
    Debate,
    ImprovedResponse,
    BestResponse,
    Reflection,
    Limitations,
    PeerReviews,
}

impl Stage {
    /// Stages rendered into each owned document section, in order
    pub const SECTION_STAGES: [Stage; 5] = [
        Stage::Overview,
        Stage::DetailedDesign,
        Stage::ImplementationConsiderations,
        Stage::PotentialChallenges,
        Stage::IntegrationPoints,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Overview => "overview",
            Stage::DetailedDesign => "detailed_design",
            Stage::ImplementationConsiderations => "implementation_considerations",
            Stage::PotentialChallenges => "potential_challenges",
            Stage::IntegrationPoints => "integration_points",
            Stage::ChainOfThought => "chain_of_thought",
            Stage::Debate => "debate",
            Stage::ImprovedResponse => "improved_response",
            Stage::BestResponse => "best_response",
            Stage::Reflection => "reflection",
            Stage::Limitations => "limitations",
            Stage::PeerReviews => "peer_reviews",
        }
    }

    /// Heading used when the stage is rendered into the document
    pub fn heading(&self) -> &'static str {
        match self {
            Stage::Overview => "Overview",
            Stage::DetailedDesign => "Detailed Design",
            Stage::ImplementationConsiderations => "Implementation Considerations",
            Stage::PotentialChallenges => "Potential Challenges",
            Stage::IntegrationPoints => "Integration Points",
            Stage::ChainOfThought => "Chain of Thought",
            Stage::Debate => "Debate",
            Stage::ImprovedResponse => "Improved Response",
            Stage::BestResponse => "Best Response",
            Stage::Reflection => "Reflection",
            Stage::Limitations => "Limitations",
            Stage::PeerReviews => "Peer Reviews",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.heading())
    }
}

/// Output of one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutput {
    Single(Fragment),
    Sequence(Vec<Fragment>),
}

impl StageOutput {
    pub fn fragments(&self) -> &[Fragment] {
        match self {
            StageOutput::Single(fragment) => std::slice::from_ref(fragment),
            StageOutput::Sequence(fragments) => fragments,
        }
    }

    /// Rendered text; sequence members are separated by newlines.
    pub fn text(&self) -> String {
        match self {
            StageOutput::Single(fragment) => fragment.text(),
            StageOutput::Sequence(fragments) => fragments
                .iter()
                .map(Fragment::text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn is_fully_degraded(&self) -> bool {
        let fragments = self.fragments();
        !fragments.is_empty() && fragments.iter().all(Fragment::is_degraded)
    }
}

impl From<Fragment> for StageOutput {
    fn from(fragment: Fragment) -> Self {
        StageOutput::Single(fragment)
    }
}

impl From<Vec<Fragment>> for StageOutput {
    fn from(fragments: Vec<Fragment>) -> Self {
        StageOutput::Sequence(fragments)
    }
}

/// Completion status of an agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AgentStatus {
    Completed,
    Failed { reason: String },
}

/// Everything one agent produced in a run (Value Object)
///
/// Built once by the task runner; the orchestrator only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    agent: String,
    status: AgentStatus,
    stages: BTreeMap<Stage, StageOutput>,
    duration_ms: u64,
}

impl AgentResult {
    pub fn new(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            status: AgentStatus::Completed,
            stages: BTreeMap::new(),
            duration_ms: 0,
        }
    }

    /// Marker result substituted for an agent whose task runner failed.
    ///
    /// Every listed stage carries the same error marker.
    pub fn failed(agent: impl Into<String>, reason: impl Into<String>, stages: &[Stage]) -> Self {
        let reason = reason.into();
        let stages = stages
            .iter()
            .map(|stage| (*stage, StageOutput::Single(Fragment::degraded(reason.clone()))))
            .collect();
        Self {
            agent: agent.into(),
            status: AgentStatus::Failed { reason },
            stages,
            duration_ms: 0,
        }
    }

    pub fn with_stage(mut self, stage: Stage, output: impl Into<StageOutput>) -> Self {
        self.stages.insert(stage, output.into());
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn status(&self) -> &AgentStatus {
        &self.status
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, AgentStatus::Failed { .. })
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageOutput> {
        self.stages.get(&stage)
    }

    pub fn text(&self, stage: Stage) -> Option<String> {
        self.stages.get(&stage).map(StageOutput::text)
    }

    pub fn stages(&self) -> impl Iterator<Item = (&Stage, &StageOutput)> {
        self.stages.iter()
    }

    /// Strongest single answer: best response, then improved response, then overview.
    pub fn best_response(&self) -> Option<String> {
        [Stage::BestResponse, Stage::ImprovedResponse, Stage::Overview]
            .iter()
            .find_map(|stage| self.text(*stage))
    }

    /// Body written into each section the agent owns.
    pub fn section_body(&self) -> String {
        Stage::SECTION_STAGES
            .iter()
            .filter_map(|stage| {
                self.text(*stage)
                    .map(|text| format!("### {}\n{}", stage.heading(), text))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Number of degraded fragments across every stage
    pub fn degraded_count(&self) -> usize {
        self.stages
            .values()
            .flat_map(|output| output.fragments())
            .filter(|f| f.is_degraded())
            .count()
    }

    /// The agent's contribution as folded back into the shared context
    pub fn contribution(&self) -> String {
        self.best_response()
            .unwrap_or_else(|| error_marker("no content produced"))
    }
}

/// All agent results of one run, in roster order (append-only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    results: Vec<AgentResult>,
}

impl RunResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an agent's result. Each agent is recorded exactly once.
    pub fn push(&mut self, result: AgentResult) {
        debug_assert!(
            self.get(result.agent()).is_none(),
            "agent {} recorded twice",
            result.agent()
        );
        self.results.push(result);
    }

    pub fn get(&self, agent: &str) -> Option<&AgentResult> {
        self.results.iter().find(|r| r.agent() == agent)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentResult> {
        self.results.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.agent()).collect()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }
}
