//! Artifact sink port
//!
//! Persists the finished document (and, for council runs, the per-agent
//! results) somewhere durable.

use council_domain::{Document, RunResults};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize results: {0}")]
    Serialize(String),
}

/// What a sink is asked to persist
#[derive(Debug, Clone, Copy)]
pub struct Artifact<'a> {
    pub document: &'a Document,
    /// Per-agent results; `None` for synthesis runs
    pub results: Option<&'a RunResults>,
}

impl<'a> Artifact<'a> {
    pub fn document(document: &'a Document) -> Self {
        Self {
            document,
            results: None,
        }
    }

    pub fn with_results(mut self, results: &'a RunResults) -> Self {
        self.results = Some(results);
        self
    }
}

/// Destination for run output
pub trait ArtifactSink: Send + Sync {
    /// Persist the artifact, returning the locations written.
    fn write(&self, artifact: Artifact<'_>) -> Result<Vec<PathBuf>, ArtifactError>;
}
