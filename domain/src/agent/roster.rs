//! Roster: the ordered list of agents taking part in a run

use super::spec::AgentSpec;
use crate::core::error::DomainError;
use std::collections::HashSet;

/// Ordered, validated list of agents (Entity)
///
/// Order matters: each agent sees the compounded context of every agent
/// before it, so reordering the roster changes the output.
#[derive(Debug, Clone)]
pub struct Roster {
    agents: Vec<AgentSpec>,
}

impl Roster {
    /// Build a roster, rejecting empty lists, duplicate names and invalid agents.
    pub fn new(agents: Vec<AgentSpec>) -> Result<Self, DomainError> {
        if agents.is_empty() {
            return Err(DomainError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for agent in &agents {
            agent.validate()?;
            if !seen.insert(agent.name().to_string()) {
                return Err(DomainError::DuplicateAgent(agent.name().to_string()));
            }
        }

        Ok(Self { agents })
    }

    pub fn agents(&self) -> &[AgentSpec] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AgentSpec> {
        self.agents.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&AgentSpec> {
        self.agents.iter().find(|a| a.name() == name)
    }

    /// Last agent in roster order; it runs the cross-agent passes.
    pub fn last(&self) -> &AgentSpec {
        // `new` guarantees at least one agent
        &self.agents[self.agents.len() - 1]
    }

    /// Reviewer for the `index`-th peer review: round-robin over the roster.
    pub fn reviewer(&self, index: usize) -> &AgentSpec {
        &self.agents[index % self.agents.len()]
    }

    pub fn names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::spec::test_support::agent;

    #[test]
    fn test_empty_roster_rejected() {
        assert_eq!(Roster::new(vec![]).unwrap_err(), DomainError::EmptyRoster);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Roster::new(vec![agent("A", &["X"]), agent("A", &["Y"])]).unwrap_err();
        assert_eq!(err, DomainError::DuplicateAgent("A".to_string()));
    }

    #[test]
    fn test_reviewer_round_robin_wraps() {
        let roster = Roster::new(vec![agent("A", &["X"]), agent("B", &["Y"])]).unwrap();
        let picked: Vec<&str> = (0..5).map(|i| roster.reviewer(i).name()).collect();
        assert_eq!(picked, vec!["A", "B", "A", "B", "A"]);
    }

    #[test]
    fn test_find_and_last() {
        let roster = Roster::new(vec![agent("A", &["X"]), agent("Overmind", &["Y"])]).unwrap();
        assert_eq!(roster.find("Overmind").map(|a| a.name()), Some("Overmind"));
        assert!(roster.find("Nobody").is_none());
        assert_eq!(roster.last().name(), "Overmind");
        assert_eq!(roster.names(), vec!["A", "Overmind"]);
    }
}
