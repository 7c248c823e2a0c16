//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain types by
//! [`FileConfig::resolve`].

mod agent;
mod context;
mod deduplication;
mod output;
mod pipeline;
mod provider;
mod synthesis;

pub use agent::FileAgentConfig;
pub use context::FileContextConfig;
pub use deduplication::{EmbeddingProvider, FileDeduplicationConfig};
pub use output::FileOutputConfig;
pub use pipeline::FilePipelineConfig;
pub use provider::FileProviderConfig;
pub use synthesis::FileSynthesisConfig;

use super::credentials::CredentialResolver;
use super::error::ConfigError;
use council_domain::{ContextBudget, ModelId, PipelineSettings, Roster};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default inference endpoint
    pub provider: FileProviderConfig,
    /// The roster, in execution order
    pub agents: Vec<FileAgentConfig>,
    pub pipeline: FilePipelineConfig,
    pub context: FileContextConfig,
    pub synthesis: FileSynthesisConfig,
    pub deduplication: FileDeduplicationConfig,
    pub output: FileOutputConfig,
}

/// Configuration converted into validated domain types
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub roster: Roster,
    pub settings: PipelineSettings,
    pub budget: ContextBudget,
    pub summarizer_model: ModelId,
}

impl FileConfig {
    /// Validate every section and build the roster.
    ///
    /// Unset credentials are logged and left unresolved; the affected agent
    /// fails at run time without aborting the run.
    pub fn resolve(&self, resolver: &dyn CredentialResolver) -> Result<ResolvedConfig, ConfigError> {
        if self.agents.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        let agents = self
            .agents
            .iter()
            .enumerate()
            .map(|(index, agent)| agent.to_agent_spec(index, resolver))
            .collect::<Result<Vec<_>, _>>()?;
        let roster = Roster::new(agents)?;

        self.synthesis.validate()?;
        self.deduplication.validate()?;

        Ok(ResolvedConfig {
            roster,
            settings: self.pipeline.to_settings()?,
            budget: self.context.to_context_budget()?,
            summarizer_model: self.context.summarizer_model()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::credentials::MapCredentialResolver;
    use council_domain::{DomainError, PipelineVariant};

    const FULL: &str = r#"
[provider]
base_url = "http://localhost:8080/v1"
timeout_seconds = 30

[pipeline]
variant = "full"
debate_rounds = 2

[context]
max_tokens = 2000

[[agents]]
name = "Game Designer"
credential = "DESIGNER_KEY"
model = "gpt-4o"
prompt = "As a game designer, expand on: {context}"
sections = ["Gameplay Mechanics", "Level Design"]

[[agents]]
name = "Overmind"
credential = "OVERMIND_KEY"
model = "gpt-4o"
prompt = "Synthesize: {context}"
sections = ["Executive Summary"]

[output]
stem = "my_game"
"#;

    #[test]
    fn test_deserialize_full_config() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        assert_eq!(config.provider.base_url, "http://localhost:8080/v1");
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.pipeline.debate_rounds, 2);
        assert_eq!(config.output.stem, "my_game");
        // Defaults fill the rest
        assert_eq!(config.pipeline.chain_of_thought_steps, 3);
        assert_eq!(config.synthesis.concurrency, 5);
        assert!(config.deduplication.enabled);
    }

    #[test]
    fn test_resolve() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        let resolver = MapCredentialResolver::new().with("DESIGNER_KEY", "sk-d");

        let resolved = config.resolve(&resolver).unwrap();

        assert_eq!(resolved.roster.names(), vec!["Game Designer", "Overmind"]);
        assert_eq!(resolved.settings.variant, PipelineVariant::Full);
        assert_eq!(resolved.settings.refinement.debate_rounds, 2);
        assert_eq!(resolved.budget.max_tokens(), 2000);
        assert!(
            !resolved
                .roster
                .find("Overmind")
                .unwrap()
                .binding()
                .credential
                .is_resolved()
        );
    }

    #[test]
    fn test_empty_roster() {
        let err = FileConfig::default()
            .resolve(&MapCredentialResolver::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRoster));
    }

    #[test]
    fn test_duplicate_agent_names() {
        let mut config: FileConfig = toml::from_str(FULL).unwrap();
        config.agents[1].name = Some("Game Designer".into());

        let err = config.resolve(&MapCredentialResolver::new()).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Domain(DomainError::DuplicateAgent(_))
        ));
    }

    #[test]
    fn test_default_config_serializes() {
        let text = toml::to_string(&FileConfig::default()).unwrap();
        let back: FileConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, FileConfig::default());
    }
}
