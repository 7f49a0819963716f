//! HTTP inference client for OpenAI-compatible `/chat/completions` endpoints
//! (llama.cpp server, Ollama, vLLM, ...).
//!
//! One POST per turn. No retries, no streaming.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, error};

use llamawiz_core::config::InferenceConfig;
use llamawiz_core::types::{conversation_messages, ChatCompletionRequest, ChatCompletionResponse, Exchange};

use crate::traits::{Completion, InferenceClient, InferenceError, RequestParams};

// ─────────────────────────────────────────────
// HttpInferenceClient
// ─────────────────────────────────────────────

/// Talks to a single chat-completion endpoint over HTTP via `reqwest`.
pub struct HttpInferenceClient {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// Full `.../chat/completions` URL.
    url: String,
    /// Bearer token, if the endpoint wants one.
    api_key: Option<String>,
    /// Model and sampling parameters.
    params: RequestParams,
}

impl std::fmt::Debug for HttpInferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpInferenceClient")
            .field("url", &self.url)
            .field("model", &self.params.model)
            .field("authenticated", &self.api_key.is_some())
            .finish()
    }
}

impl HttpInferenceClient {
    /// Build a client from the inference section of the config.
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build().context("failed to build HTTP client")?;

        Ok(HttpInferenceClient {
            client,
            url: config.completions_url(),
            api_key: config.has_api_key().then(|| config.api_key.clone()),
            params: RequestParams::from(config),
        })
    }

    /// The endpoint URL requests are sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_request(&self, history: &[Exchange], new_user_message: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            messages: conversation_messages(history, new_user_message),
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
            model: self.params.model.clone(),
        }
    }

    async fn send(&self, body: &ChatCompletionRequest) -> Result<String, InferenceError> {
        let mut request = self.client.post(&self.url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        let status = response.status();
        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) if status.is_success() => return Err(InferenceError::Transport(e.to_string())),
            Err(_) => "Failed to read error body".to_string(),
        };

        match serde_json::from_str::<ChatCompletionResponse>(&raw) {
            Ok(parsed) => {
                // Any JSON object is a reply, whatever the status.
                if !status.is_success() {
                    debug!(status = status.as_u16(), "error status with JSON body");
                }
                Ok(parsed.reply_text())
            }
            Err(_) if !status.is_success() => Err(InferenceError::Status {
                status: status.as_u16(),
                body: raw,
            }),
            Err(e) => Err(InferenceError::Parse(e.to_string())),
        }
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn complete(&self, history: &[Exchange], new_user_message: &str) -> Completion {
        let body = self.build_request(history, new_user_message);

        debug!(
            url = %self.url,
            model = %self.params.model,
            messages = body.messages.len(),
            "calling inference endpoint"
        );

        match self.send(&body).await {
            Ok(text) => {
                debug!(chars = text.chars().count(), "inference reply received");
                Completion::Reply(text)
            }
            Err(e) => {
                error!(url = %self.url, error = %e, "inference request failed");
                Completion::Failed(e)
            }
        }
    }

    fn model(&self) -> &str {
        &self.params.model
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ERROR_PREFIX;
    use llamawiz_core::types::NO_RESPONSE;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn make_config(api_base: &str) -> InferenceConfig {
        InferenceConfig {
            api_base: api_base.to_string(),
            ..Default::default()
        }
    }

    fn reply_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    // ── Unit tests ──

    #[test]
    fn test_url_from_config() {
        let client = HttpInferenceClient::new(&make_config("http://localhost:11434/v1/")).unwrap();
        assert_eq!(client.url(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_no_api_key_by_default() {
        let client = HttpInferenceClient::new(&make_config("http://localhost")).unwrap();
        assert!(client.api_key.is_none());
        assert_eq!(client.model(), "llama3.2:3b");
    }

    #[test]
    fn test_build_request_flattens_history() {
        let client = HttpInferenceClient::new(&make_config("http://localhost")).unwrap();
        let history = vec![Exchange::new("Hello", "Hi there!")];
        let request = client.build_request(&history, "How are you?");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "messages": [
                    {"role": "user", "content": "Hello"},
                    {"role": "assistant", "content": "Hi there!"},
                    {"role": "user", "content": "How are you?"}
                ],
                "max_tokens": 512,
                "temperature": 0.1,
                "model": "llama3.2:3b"
            })
        );
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("Hi there!")))
            .mount(&mock_server)
            .await;

        let client = HttpInferenceClient::new(&make_config(&mock_server.uri())).unwrap();
        let completion = client.complete(&[], "Hello").await;

        assert_eq!(completion, Completion::Reply("Hi there!".into()));
    }

    #[tokio::test]
    async fn test_complete_sends_exact_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_json(serde_json::json!({
                "messages": [
                    {"role": "user", "content": "one"},
                    {"role": "assistant", "content": "uno"},
                    {"role": "user", "content": "two"}
                ],
                "max_tokens": 512,
                "temperature": 0.1,
                "model": "llama3.2:3b"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("dos")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpInferenceClient::new(&make_config(&mock_server.uri())).unwrap();
        let completion = client
            .complete(&[Exchange::new("one", "uno")], "two")
            .await;

        // If the body matcher fails, wiremock returns 404 → we'd get a failure
        assert_eq!(completion.into_text(), "dos");
    }

    #[tokio::test]
    async fn test_complete_bearer_auth_when_configured() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("Authorization", "Bearer local-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("authed")))
            .mount(&mock_server)
            .await;

        let config = InferenceConfig {
            api_base: mock_server.uri(),
            api_key: "local-key".to_string(),
            ..Default::default()
        };
        let client = HttpInferenceClient::new(&config).unwrap();

        assert_eq!(client.complete(&[], "hi").await.into_text(), "authed");
    }

    #[tokio::test]
    async fn test_complete_no_auth_header_without_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(|req: &Request| {
                let authed = req.headers.contains_key("authorization");
                ResponseTemplate::new(200)
                    .set_body_json(reply_body(if authed { "auth" } else { "anon" }))
            })
            .mount(&mock_server)
            .await;

        let client = HttpInferenceClient::new(&make_config(&mock_server.uri())).unwrap();
        assert_eq!(client.complete(&[], "hi").await.into_text(), "anon");
    }

    #[tokio::test]
    async fn test_complete_custom_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "model": "qwen2.5:7b",
                "max_tokens": 64
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("ok")))
            .mount(&mock_server)
            .await;

        let config = InferenceConfig {
            api_base: mock_server.uri(),
            model: "qwen2.5:7b".to_string(),
            max_tokens: 64,
            ..Default::default()
        };
        let client = HttpInferenceClient::new(&config).unwrap();

        assert_eq!(client.complete(&[], "hi").await.into_text(), "ok");
    }

    #[tokio::test]
    async fn test_complete_unexpected_shape_is_no_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": "hello"})),
            )
            .mount(&mock_server)
            .await;

        let client = HttpInferenceClient::new(&make_config(&mock_server.uri())).unwrap();
        let completion = client.complete(&[], "hi").await;

        assert_eq!(completion, Completion::Reply(NO_RESPONSE.into()));
    }

    #[tokio::test]
    async fn test_complete_non_json_is_parse_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&mock_server)
            .await;

        let client = HttpInferenceClient::new(&make_config(&mock_server.uri())).unwrap();
        let completion = client.complete(&[], "hi").await;

        assert!(matches!(completion, Completion::Failed(InferenceError::Parse(_))));
        assert!(completion.into_text().starts_with(ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_complete_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
            .mount(&mock_server)
            .await;

        let client = HttpInferenceClient::new(&make_config(&mock_server.uri())).unwrap();
        let completion = client.complete(&[], "hi").await;

        assert_eq!(
            completion,
            Completion::Failed(InferenceError::Status {
                status: 500,
                body: "model crashed".into()
            })
        );
        let text = completion.into_text();
        assert!(text.contains("500"));
        assert!(text.contains("model crashed"));
    }

    #[tokio::test]
    async fn test_complete_error_status_with_json_body_is_no_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "model 'llama3.2:3b' not found"})),
            )
            .mount(&mock_server)
            .await;

        let client = HttpInferenceClient::new(&make_config(&mock_server.uri())).unwrap();
        let completion = client.complete(&[], "hi").await;

        assert_eq!(completion, Completion::Reply(NO_RESPONSE.into()));
    }

    #[tokio::test]
    async fn test_complete_error_status_with_content_uses_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(reply_body("busy, try later")))
            .mount(&mock_server)
            .await;

        let client = HttpInferenceClient::new(&make_config(&mock_server.uri())).unwrap();
        assert_eq!(client.complete(&[], "hi").await.into_text(), "busy, try later");
    }

    #[tokio::test]
    async fn test_complete_network_error() {
        // Point to a port that's not listening
        let client = HttpInferenceClient::new(&make_config("http://127.0.0.1:1")).unwrap();

        let completion = client.complete(&[], "Test").await;

        assert!(matches!(completion, Completion::Failed(InferenceError::Transport(_))));
        assert!(completion.into_text().starts_with(ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_complete_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(reply_body("late"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let config = InferenceConfig {
            api_base: mock_server.uri(),
            timeout_secs: 1,
            ..Default::default()
        };
        let client = HttpInferenceClient::new(&config).unwrap();

        let completion = client.complete(&[], "hi").await;
        assert!(matches!(completion, Completion::Failed(InferenceError::Transport(_))));
    }
}
