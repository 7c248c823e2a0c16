//! `LlmGateway` over any OpenAI-compatible `/chat/completions` endpoint

use super::types::{ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use council_application::ports::llm_gateway::{GatewayError, LlmGateway};
use council_domain::{InferenceBinding, PromptTemplate};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Longest slice of an error body kept in a `GatewayError`
const MAX_ERROR_BODY: usize = 300;

/// Validate a base URL before any key is sent to it.
///
/// HTTPS is always accepted; plain HTTP only for local servers.
pub fn validate_base_url(base_url: &str) -> Result<(), String> {
    let parsed = reqwest::Url::parse(base_url)
        .map_err(|e| format!("Invalid base_url '{}': {}", base_url, e))?;
    let host = parsed.host_str().unwrap_or("");

    match parsed.scheme() {
        "https" => Ok(()),
        "http" if matches!(host, "localhost" | "127.0.0.1" | "[::1]" | "::1") => {
            warn!(
                "Using unencrypted HTTP for local server at '{}'. API keys will be sent in cleartext.",
                base_url
            );
            Ok(())
        }
        "http" => Err(format!(
            "HTTP is only permitted for localhost (base_url: '{}')",
            base_url
        )),
        scheme => Err(format!(
            "Unsupported URL scheme '{}' in base_url '{}'",
            scheme, base_url
        )),
    }
}

pub struct OpenAiCompatibleGateway {
    client: Client,
    base_url: String,
    system_prompt: String,
}

impl OpenAiCompatibleGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        validate_base_url(base_url).map_err(GatewayError::Other)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            system_prompt: PromptTemplate::default_system().to_string(),
        })
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_for(&self, binding: &InferenceBinding) -> Result<String, GatewayError> {
        let base = match &binding.endpoint {
            Some(endpoint) => {
                validate_base_url(endpoint).map_err(GatewayError::Other)?;
                endpoint.trim_end_matches('/')
            }
            None => self.base_url.as_str(),
        };
        Ok(format!("{}/chat/completions", base))
    }
}

/// Map a non-success HTTP status to a gateway error.
pub(crate) fn classify_status(status: u16, body: &str) -> GatewayError {
    let message: String = body.chars().take(MAX_ERROR_BODY).collect();
    match status {
        401 | 403 => GatewayError::Unauthorized(message),
        408 => GatewayError::Timeout,
        429 => GatewayError::RateLimited(message),
        _ => GatewayError::Status { status, message },
    }
}

fn network_error(err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(err.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn complete(
        &self,
        binding: &InferenceBinding,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, GatewayError> {
        let api_key = binding.credential.secret().ok_or_else(|| {
            GatewayError::Unauthorized(format!(
                "credential '{}' is not set",
                binding.credential.reference()
            ))
        })?;

        let url = self.endpoint_for(binding)?;
        let body = ChatRequest {
            model: binding.model.as_str(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens,
        };

        info!(model = %binding.model, url = %url, "Calling chat completions");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("HTTP request failed: {}", e);
                network_error(&e)
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| network_error(&e))?;

        if !status.is_success() {
            error!(status = %status, "Provider API error: {}", text);
            return Err(classify_status(status.as_u16(), &text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let content = parsed.into_text().ok_or(GatewayError::EmptyResponse)?;
        debug!("{} returned {} chars", binding.model, content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::Credential;

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://api.openai.com/v1").is_ok());
        assert!(validate_base_url("http://localhost:11434/v1").is_ok());
        assert!(validate_base_url("http://example.com/v1").is_err());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(401, "bad key"),
            GatewayError::Unauthorized(_)
        ));
        assert!(matches!(
            classify_status(429, "slow down"),
            GatewayError::RateLimited(_)
        ));
        assert_eq!(classify_status(408, ""), GatewayError::Timeout);
        assert!(matches!(
            classify_status(503, "down"),
            GatewayError::Status { status: 503, .. }
        ));
    }

    #[test]
    fn test_error_body_is_truncated() {
        let body = "x".repeat(1_000);
        match classify_status(500, &body) {
            GatewayError::Status { message, .. } => assert_eq!(message.len(), MAX_ERROR_BODY),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_override() {
        let gateway =
            OpenAiCompatibleGateway::new("https://api.openai.com/v1/", Duration::from_secs(5))
                .unwrap();
        let default = InferenceBinding::new("gpt-4o", Credential::resolved("K", "v"));
        assert_eq!(
            gateway.endpoint_for(&default).unwrap(),
            "https://api.openai.com/v1/chat/completions"
        );

        let local = default.clone().with_endpoint("http://localhost:8080/v1");
        assert_eq!(
            gateway.endpoint_for(&local).unwrap(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_parse_chat_response() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"  hello  "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.into_text(), Some("hello".to_string()));

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(empty.into_text(), None);
    }

    #[tokio::test]
    async fn test_missing_secret_is_rejected_locally() {
        let gateway =
            OpenAiCompatibleGateway::new(DEFAULT_BASE_URL, Duration::from_secs(5)).unwrap();
        let unbound = InferenceBinding::new("gpt-4o", Credential::missing("OPENAI_API_KEY"));

        let err = gateway.complete(&unbound, "hi", 10).await.unwrap_err();

        assert!(matches!(err, GatewayError::Unauthorized(_)));
    }
}
