//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No agents configured for the council")]
    EmptyRoster,

    #[error("Duplicate agent name in roster: {0}")]
    DuplicateAgent(String),

    #[error("Invalid agent '{agent}': {reason}")]
    InvalidAgent { agent: String, reason: String },

    #[error("Duplicate section id in document template: {0}")]
    DuplicateSection(String),

    #[error("Invalid pipeline settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid run state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl DomainError {
    /// Check if this error is a roster-level configuration problem
    pub fn is_roster_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyRoster
                | DomainError::DuplicateAgent(_)
                | DomainError::InvalidAgent { .. }
        )
    }
}
