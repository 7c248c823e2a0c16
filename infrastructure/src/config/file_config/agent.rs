//! Agent roster entries from TOML (`[[agents]]` array)

use super::super::credentials::CredentialResolver;
use super::super::error::ConfigError;
use council_domain::{AgentSpec, InferenceBinding};
use serde::{Deserialize, Serialize};

/// One `[[agents]]` entry.
///
/// Every field is optional at parse time so a missing one can be reported
/// with its position instead of a generic parse failure.
///
/// ```toml
/// [[agents]]
/// name = "Game Designer"
/// credential = "OPENAI_API_KEY"
/// model = "gpt-4o"
/// prompt = "As a game designer, expand on this idea: {context}"
/// sections = ["Gameplay Mechanics", "Level Design"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub name: Option<String>,
    /// Name of the environment variable holding the API key
    #[serde(alias = "api_key")]
    pub credential: Option<String>,
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub sections: Vec<String>,
    /// Endpoint override for this agent only
    pub base_url: Option<String>,
}

impl FileAgentConfig {
    /// Build the agent spec, resolving its credential through `resolver`.
    pub fn to_agent_spec(
        &self,
        index: usize,
        resolver: &dyn CredentialResolver,
    ) -> Result<AgentSpec, ConfigError> {
        let required = |value: &Option<String>, field: &'static str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(ConfigError::MissingField { index, field })
        };

        let name = required(&self.name, "name")?;
        let reference = required(&self.credential, "credential")?;
        let model = required(&self.model, "model")?;
        let prompt = required(&self.prompt, "prompt")?;
        if self.sections.is_empty() {
            return Err(ConfigError::MissingField {
                index,
                field: "sections",
            });
        }

        let mut binding = InferenceBinding::new(model, resolver.resolve(&name, &reference));
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            binding = binding.with_endpoint(url);
        }

        let spec = AgentSpec::new(name, binding, prompt, self.sections.clone());
        spec.validate()?;
        Ok(spec)
    }
}
