//! Configuration errors

use council_domain::DomainError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("agents[{index}]: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("No agents configured; add at least one [[agents]] entry")]
    EmptyRoster,

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
