//! Agent specification value objects

use crate::core::error::DomainError;
use crate::core::model::ModelId;

/// API credential for an inference endpoint.
///
/// `reference` is the name under which the secret was looked up (usually an
/// environment variable). The secret itself never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    reference: String,
    secret: Option<String>,
}

impl Credential {
    pub fn resolved(reference: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            secret: Some(secret.into()),
        }
    }

    /// A credential whose secret could not be found at load time.
    pub fn missing(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            secret: None,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.secret.is_some()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("reference", &self.reference)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Everything the gateway needs to reach one model on behalf of an agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceBinding {
    pub model: ModelId,
    pub credential: Credential,
    /// Per-agent endpoint override; `None` uses the gateway default
    pub endpoint: Option<String>,
}

impl InferenceBinding {
    pub fn new(model: impl Into<ModelId>, credential: Credential) -> Self {
        Self {
            model: model.into(),
            credential,
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Same credential and endpoint, different model.
    pub fn with_model(&self, model: ModelId) -> Self {
        Self {
            model,
            credential: self.credential.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}

/// One configured specialist role (Value Object)
///
/// Owned by the [`Roster`](super::roster::Roster); task runners only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSpec {
    name: String,
    binding: InferenceBinding,
    prompt_template: String,
    sections: Vec<String>,
}

impl AgentSpec {
    pub fn new(
        name: impl Into<String>,
        binding: InferenceBinding,
        prompt_template: impl Into<String>,
        sections: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            binding,
            prompt_template: prompt_template.into(),
            sections,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn binding(&self) -> &InferenceBinding {
        &self.binding
    }

    pub fn model(&self) -> &ModelId {
        &self.binding.model
    }

    pub fn prompt_template(&self) -> &str {
        &self.prompt_template
    }

    /// Section headings this agent owns, in declaration order
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Render the prompt template against the (already budgeted) context.
    ///
    /// `{context}` is preferred; a bare `{}` is accepted for templates written
    /// positionally. Templates with no placeholder get the context appended.
    pub fn render_prompt(&self, context: &str) -> String {
        if self.prompt_template.contains("{context}") {
            self.prompt_template.replace("{context}", context)
        } else if self.prompt_template.contains("{}") {
            self.prompt_template.replacen("{}", context, 1)
        } else {
            format!("{}\n\n{}", self.prompt_template.trim_end(), context)
        }
    }

    /// Validate structural requirements that do not depend on credentials
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidAgent {
            agent: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if self.binding.model.is_empty() {
            return Err(invalid("model cannot be empty"));
        }
        if self.prompt_template.trim().is_empty() {
            return Err(invalid("prompt template cannot be empty"));
        }
        if self.sections.is_empty() {
            return Err(invalid("at least one section is required"));
        }
        if self.sections.iter().any(|s| s.trim().is_empty()) {
            return Err(invalid("section names cannot be empty"));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::agent;
    use super::*;

    #[test]
    fn test_render_named_placeholder() {
        let spec = agent("A", &["Overview"]);
        assert_eq!(
            spec.render_prompt("test game"),
            "As the test game specialist, contribute."
        );
    }

    #[test]
    fn test_render_positional_placeholder() {
        let spec = AgentSpec::new(
            "A",
            InferenceBinding::new("m", Credential::missing("K")),
            "Idea: {} -- go",
            vec!["Levels".into()],
        );
        assert_eq!(spec.render_prompt("colony"), "Idea: colony -- go");
    }

    #[test]
    fn test_render_without_placeholder_appends() {
        let spec = AgentSpec::new(
            "A",
            InferenceBinding::new("m", Credential::missing("K")),
            "Design the levels.",
            vec!["Levels".into()],
        );
        assert_eq!(spec.render_prompt("colony"), "Design the levels.\n\ncolony");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::resolved("OPENAI_API_KEY", "sk-secret");
        let debug = format!("{:?}", credential);
        assert!(debug.contains("OPENAI_API_KEY"));
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn test_validate_requires_sections() {
        let spec = agent("A", &[]);
        assert!(matches!(
            spec.validate(),
            Err(DomainError::InvalidAgent { .. })
        ));
        assert!(agent("A", &["Interface"]).validate().is_ok());
    }

    #[test]
    fn test_binding_with_model_keeps_credential() {
        let binding = InferenceBinding::new("gpt-4o", Credential::resolved("K", "v"))
            .with_endpoint("http://localhost:8080/v1");
        let swapped = binding.with_model(ModelId::new("gpt-4o-mini"));
        assert_eq!(swapped.model.as_str(), "gpt-4o-mini");
        assert_eq!(swapped.credential, binding.credential);
        assert_eq!(swapped.endpoint, binding.endpoint);
    }
}
