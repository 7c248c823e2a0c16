//! Orchestrator state machine

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// State of a council run
///
/// `Idle -> Running(0) -> ... -> Running(n-1) -> Aggregating -> MetaAnalyzing
/// -> FinalReviewing -> Done`. `Fatal` is reachable only from `Idle`, for
/// configuration problems found before any agent runs. Agent failures never
/// leave the `Running` chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running(usize),
    Aggregating,
    MetaAnalyzing,
    FinalReviewing,
    Done,
    Fatal(String),
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running(_) => "running",
            RunState::Aggregating => "aggregating",
            RunState::MetaAnalyzing => "meta_analyzing",
            RunState::FinalReviewing => "final_reviewing",
            RunState::Done => "done",
            RunState::Fatal(_) => "fatal",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Fatal(_))
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Running(index) => write!(f, "running({})", index),
            RunState::Fatal(reason) => write!(f, "fatal({})", reason),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// A recorded non-fatal agent failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFailure {
    pub index: usize,
    pub agent: String,
    pub reason: String,
}

/// Tracks the progress of one council run (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilRun {
    roster_size: usize,
    state: RunState,
    completed: usize,
    failures: Vec<AgentFailure>,
}

impl CouncilRun {
    pub fn new(roster_size: usize) -> Self {
        Self {
            roster_size,
            state: RunState::Idle,
            completed: 0,
            failures: Vec::new(),
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn roster_size(&self) -> usize {
        self.roster_size
    }

    /// Agents processed so far, failed ones included
    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn failures(&self) -> &[AgentFailure] {
        &self.failures
    }

    /// `Idle -> Running(0)`, or `Idle -> Fatal` for an empty roster.
    pub fn start(&mut self) -> Result<(), DomainError> {
        self.guard(matches!(self.state, RunState::Idle), "running(0)")?;
        if self.roster_size == 0 {
            self.state = RunState::Fatal(DomainError::EmptyRoster.to_string());
            return Err(DomainError::EmptyRoster);
        }
        self.state = RunState::Running(0);
        Ok(())
    }

    /// Abort before any agent ran.
    pub fn fail_fatal(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.guard(matches!(self.state, RunState::Idle), "fatal")?;
        self.state = RunState::Fatal(reason.into());
        Ok(())
    }

    /// Record that the current agent finished, successfully or not, and
    /// advance to the next agent or to `Aggregating` after the last one.
    pub fn agent_finished(&mut self, agent: &str, failure: Option<String>) -> Result<(), DomainError> {
        let index = match self.state {
            RunState::Running(index) => index,
            _ => return Err(self.invalid("running(next)")),
        };

        if let Some(reason) = failure {
            self.failures.push(AgentFailure {
                index,
                agent: agent.to_string(),
                reason,
            });
        }
        self.completed += 1;

        self.state = if index + 1 < self.roster_size {
            RunState::Running(index + 1)
        } else {
            RunState::Aggregating
        };
        Ok(())
    }

    pub fn begin_meta_analysis(&mut self) -> Result<(), DomainError> {
        self.guard(matches!(self.state, RunState::Aggregating), "meta_analyzing")?;
        self.state = RunState::MetaAnalyzing;
        Ok(())
    }

    pub fn begin_final_review(&mut self) -> Result<(), DomainError> {
        self.guard(
            matches!(self.state, RunState::MetaAnalyzing),
            "final_reviewing",
        )?;
        self.state = RunState::FinalReviewing;
        Ok(())
    }

    pub fn finish(&mut self) -> Result<(), DomainError> {
        self.guard(matches!(self.state, RunState::FinalReviewing), "done")?;
        self.state = RunState::Done;
        Ok(())
    }

    fn guard(&self, allowed: bool, to: &str) -> Result<(), DomainError> {
        if allowed { Ok(()) } else { Err(self.invalid(to)) }
    }

    fn invalid(&self, to: &str) -> DomainError {
        DomainError::InvalidTransition {
            from: self.state.to_string(),
            to: to.to_string(),
        }
    }
}
