//! HTTP client for the hosted prompt endpoint.
//!
//! One `POST {api_base}/responses` per turn, Bearer-authenticated, carrying
//! the prompt identity, the `user_message` variable binding, and the
//! conversation handle from the previous turn.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, error};

use promptchat_core::error::ProviderError;
use promptchat_core::types::{PromptReply, PromptRef, PromptRequest, PromptResponse};
use promptchat_core::utils::truncate_string;

use crate::traits::{PromptProvider, PromptTurn};

/// Request timeout for one completion call.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Max characters of an error body carried into the error value.
const ERROR_BODY_EXCERPT: usize = 300;

// ─────────────────────────────────────────────
// HttpPromptProvider
// ─────────────────────────────────────────────

/// Reqwest-backed [`PromptProvider`] for the hosted prompt endpoint.
pub struct HttpPromptProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
}

impl std::fmt::Debug for HttpPromptProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPromptProvider")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl HttpPromptProvider {
    /// Create a new provider from a base URL and credential.
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        HttpPromptProvider {
            client,
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    /// Build the full responses URL.
    fn responses_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/responses", base)
    }
}

#[async_trait]
impl PromptProvider for HttpPromptProvider {
    async fn complete(&self, turn: PromptTurn<'_>) -> Result<PromptReply, ProviderError> {
        let mut variables = HashMap::new();
        variables.insert("user_message".to_string(), turn.user_message.to_string());

        let request_body = PromptRequest {
            prompt: PromptRef {
                id: turn.prompt_id.to_string(),
                version: turn.prompt_version.to_string(),
                variables,
            },
            conversation: turn.conversation_id.map(String::from),
        };

        debug!(
            prompt = turn.prompt_id,
            version = turn.prompt_version,
            continuing = turn.conversation_id.is_some(),
            "calling prompt endpoint"
        );

        let response = self
            .client
            .post(self.responses_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                ProviderError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(status = %status, body = %body, "prompt endpoint error");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: truncate_string(&body, ERROR_BODY_EXCERPT),
            });
        }

        let prompt_resp: PromptResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse prompt endpoint response");
            ProviderError::Decode(e.to_string())
        })?;

        let reply: PromptReply = prompt_resp.into();
        debug!(
            has_text = reply.text.is_some(),
            has_conversation = reply.conversation_id.is_some(),
            "prompt endpoint reply received"
        );
        Ok(reply)
    }

    fn display_name(&self) -> &str {
        "prompt endpoint"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use promptchat_core::error::ProviderError;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn turn<'a>(user_message: &'a str, conversation_id: Option<&'a str>) -> PromptTurn<'a> {
        PromptTurn {
            prompt_id: "pmpt_test",
            prompt_version: "1",
            user_message,
            conversation_id,
        }
    }

    // ── Unit tests ──

    #[test]
    fn test_responses_url_trailing_slash() {
        let provider = HttpPromptProvider::new("https://api.openai.com/v1/", "key");
        assert_eq!(
            provider.responses_url(),
            "https://api.openai.com/v1/responses"
        );
    }

    #[test]
    fn test_responses_url_no_trailing_slash() {
        let provider = HttpPromptProvider::new("https://api.openai.com/v1", "key");
        assert_eq!(
            provider.responses_url(),
            "https://api.openai.com/v1/responses"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let provider = HttpPromptProvider::new("https://api.openai.com/v1", "sk-secret");
        let debugged = format!("{:?}", provider);
        assert!(!debugged.contains("sk-secret"));
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/responses"))
            .and(header("Authorization", "Bearer test-key-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "resp_001",
                "output_text": "Hi there",
                "conversation_id": "conv_1"
            })))
            .mount(&mock_server)
            .await;

        let provider = HttpPromptProvider::new(mock_server.uri(), "test-key-123");
        let reply = provider.complete(turn("Hello", None)).await.unwrap();

        assert_eq!(reply.text.as_deref(), Some("Hi there"));
        assert_eq!(reply.conversation_id.as_deref(), Some("conv_1"));
    }

    #[tokio::test]
    async fn test_complete_sends_prompt_and_variables() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/responses"))
            .and(body_partial_json(serde_json::json!({
                "prompt": {
                    "id": "pmpt_test",
                    "version": "1",
                    "variables": { "user_message": "What can you do?" }
                },
                "conversation": "conv_1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "resp_002",
                "output_text": "Lots",
                "conversation_id": "conv_2"
            })))
            .mount(&mock_server)
            .await;

        let provider = HttpPromptProvider::new(mock_server.uri(), "key");
        // If the body matcher fails, wiremock returns 404 → we'd get an Err
        let reply = provider
            .complete(turn("What can you do?", Some("conv_1")))
            .await
            .unwrap();

        assert_eq!(reply.conversation_id.as_deref(), Some("conv_2"));
    }

    #[tokio::test]
    async fn test_complete_missing_output_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "resp_003",
                "conversation_id": "conv_1"
            })))
            .mount(&mock_server)
            .await;

        let provider = HttpPromptProvider::new(mock_server.uri(), "key");
        let reply = provider.complete(turn("Hello", None)).await.unwrap();

        // Missing text is a successful-but-empty reply; policy lives upstream.
        assert!(reply.text.is_none());
        assert_eq!(reply.conversation_id.as_deref(), Some("conv_1"));
    }

    #[tokio::test]
    async fn test_complete_missing_conversation_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "resp_004",
                "output_text": "answer"
            })))
            .mount(&mock_server)
            .await;

        let provider = HttpPromptProvider::new(mock_server.uri(), "key");
        let reply = provider
            .complete(turn("Hello", Some("conv_1")))
            .await
            .unwrap();

        assert_eq!(reply.text.as_deref(), Some("answer"));
        assert!(reply.conversation_id.is_none());
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {
                    "message": "Rate limit exceeded",
                    "type": "rate_limit_error"
                }
            })))
            .mount(&mock_server)
            .await;

        let provider = HttpPromptProvider::new(mock_server.uri(), "key");
        let err = provider.complete(turn("Hello", None)).await.unwrap_err();

        match err {
            ProviderError::Api { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("Rate limit exceeded"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_network_error() {
        // Point to a port that's not listening
        let provider = HttpPromptProvider::new("http://127.0.0.1:1", "key");
        let err = provider.complete(turn("Hello", None)).await.unwrap_err();

        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[tokio::test]
    async fn test_complete_undecodable_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let provider = HttpPromptProvider::new(mock_server.uri(), "key");
        let err = provider.complete(turn("Hello", None)).await.unwrap_err();

        assert!(matches!(err, ProviderError::Decode(_)));
    }
}
