//! Credential resolution
//!
//! Agent configs name the environment variable holding their API key; the
//! secret itself never lives in a config file.

use council_domain::Credential;
use std::collections::HashMap;
use tracing::error;

pub trait CredentialResolver: Send + Sync {
    fn lookup(&self, reference: &str) -> Option<String>;

    /// Resolve `reference`, logging (not failing) when it is unset.
    fn resolve(&self, agent: &str, reference: &str) -> Credential {
        match self.lookup(reference).filter(|s| !s.trim().is_empty()) {
            Some(secret) => Credential::resolved(reference, secret),
            None => {
                error!("API key not found for {} (expected in {})", agent, reference);
                Credential::missing(reference)
            }
        }
    }
}

/// Looks credentials up in the process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentialResolver;

impl CredentialResolver for EnvCredentialResolver {
    fn lookup(&self, reference: &str) -> Option<String> {
        std::env::var(reference).ok()
    }
}

/// Fixed table of credentials
#[derive(Debug, Default, Clone)]
pub struct MapCredentialResolver {
    secrets: HashMap<String, String>,
}

impl MapCredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reference: impl Into<String>, secret: impl Into<String>) -> Self {
        self.secrets.insert(reference.into(), secret.into());
        self
    }
}

impl CredentialResolver for MapCredentialResolver {
    fn lookup(&self, reference: &str) -> Option<String> {
        self.secrets.get(reference).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_resolver() {
        let resolver = MapCredentialResolver::new().with("A_KEY", "sk-a");
        assert!(resolver.resolve("A", "A_KEY").is_resolved());
        assert!(!resolver.resolve("B", "B_KEY").is_resolved());
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let resolver = MapCredentialResolver::new().with("A_KEY", "   ");
        let credential = resolver.resolve("A", "A_KEY");
        assert!(!credential.is_resolved());
        assert_eq!(credential.reference(), "A_KEY");
    }
}
