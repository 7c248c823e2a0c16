//! Inference gateway
//!
//! Validates a request before handing it to the [`LlmGateway`] port and turns
//! failures into either a typed error or a degraded [`Fragment`].

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use council_domain::{Fragment, InferenceBinding, preview};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from a single inference call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("max_tokens must be > 0")]
    InvalidMaxTokens,

    #[error("Credential '{0}' is not set")]
    MissingCredential(String),

    #[error("{0}")]
    Gateway(#[from] GatewayError),
}

/// Validating front for the LLM gateway port.
///
/// Cheap to clone; clones share the underlying adapter.
#[derive(Clone)]
pub struct InferenceGateway {
    gateway: Arc<dyn LlmGateway>,
}

impl InferenceGateway {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    /// Run one prompt/completion exchange.
    pub async fn invoke(
        &self,
        binding: &InferenceBinding,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, InferenceError> {
        if prompt.trim().is_empty() {
            return Err(InferenceError::EmptyPrompt);
        }
        if max_tokens == 0 {
            return Err(InferenceError::InvalidMaxTokens);
        }
        if !binding.credential.is_resolved() {
            return Err(InferenceError::MissingCredential(
                binding.credential.reference().to_string(),
            ));
        }

        debug!(
            "Invoking {} (max_tokens={}): {}",
            binding.model,
            max_tokens,
            preview(prompt, 80)
        );

        let text = self.gateway.complete(binding, prompt, max_tokens).await?;
        debug!("{} returned {} chars", binding.model, text.len());
        Ok(text)
    }

    /// Like [`invoke`](Self::invoke), but a failure becomes a degraded fragment.
    pub async fn fragment(
        &self,
        binding: &InferenceBinding,
        prompt: &str,
        max_tokens: u32,
    ) -> Fragment {
        match self.invoke(binding, prompt, max_tokens).await {
            Ok(text) => Fragment::generated(text),
            Err(e) => {
                warn!("Model {} failed: {}", binding.model, e);
                Fragment::degraded(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EchoGateway, binding, echo_of};
    use council_domain::{Credential, is_error_marker};

    fn gateway() -> InferenceGateway {
        InferenceGateway::new(Arc::new(EchoGateway::new()))
    }

    #[tokio::test]
    async fn test_invoke_returns_completion() {
        let text = gateway()
            .invoke(&binding("gpt-4o"), "hello", 100)
            .await
            .unwrap();
        assert_eq!(text, echo_of("hello"));
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let err = gateway()
            .invoke(&binding("gpt-4o"), "   ", 100)
            .await
            .unwrap_err();
        assert_eq!(err, InferenceError::EmptyPrompt);
    }

    #[tokio::test]
    async fn test_zero_max_tokens_rejected() {
        let err = gateway()
            .invoke(&binding("gpt-4o"), "hello", 0)
            .await
            .unwrap_err();
        assert_eq!(err, InferenceError::InvalidMaxTokens);
    }

    #[tokio::test]
    async fn test_missing_credential_never_reaches_gateway() {
        let echo = Arc::new(EchoGateway::new());
        let inference = InferenceGateway::new(echo.clone());
        let unbound = InferenceBinding::new("gpt-4o", Credential::missing("NOPE_KEY"));

        let err = inference.invoke(&unbound, "hello", 100).await.unwrap_err();

        assert_eq!(err, InferenceError::MissingCredential("NOPE_KEY".into()));
        assert_eq!(echo.call_count(), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_becomes_degraded_fragment() {
        let inference =
            InferenceGateway::new(Arc::new(EchoGateway::new().failing_model("broken")));

        let fragment = inference.fragment(&binding("broken"), "hello", 100).await;

        assert!(fragment.is_degraded());
        assert!(is_error_marker(&fragment.text()));
    }
}
