//! Inference client trait — the seam between the turn processor and the
//! chat-completion endpoint.

use async_trait::async_trait;
use llamawiz_core::config::InferenceConfig;
use llamawiz_core::types::Exchange;

/// Prefix of the reply text synthesized for a failed completion.
pub const ERROR_PREFIX: &str = "Error connecting to inference endpoint";

/// Generation parameters sent with every request.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestParams {
    /// Model identifier (e.g. `"llama3.2:3b"`).
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self::from(&InferenceConfig::default())
    }
}

impl From<&InferenceConfig> for RequestParams {
    fn from(config: &InferenceConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Why a completion failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    /// The request never produced a response (DNS, refused, timeout, ...).
    #[error("{0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not JSON of the expected shape.
    #[error("invalid response body: {0}")]
    Parse(String),
}

/// Outcome of one completion call.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Assistant text (possibly the `"No response"` fallback).
    Reply(String),
    /// The call failed; the reason is kept for logs and tests.
    Failed(InferenceError),
}

impl Completion {
    pub fn is_failure(&self) -> bool {
        matches!(self, Completion::Failed(_))
    }

    /// The text shown to the user as the assistant's reply. Failures render
    /// as an error sentence embedding the reason.
    pub fn into_text(self) -> String {
        match self {
            Completion::Reply(text) => text,
            Completion::Failed(err) => format!("{ERROR_PREFIX}: {err}"),
        }
    }
}

/// Anything that can turn a conversation into an assistant reply.
///
/// Implementations never return `Err`: failures are folded into
/// [`Completion::Failed`].
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Complete `new_user_message` given the prior `history`.
    async fn complete(&self, history: &[Exchange], new_user_message: &str) -> Completion;

    /// Model identifier, for logging and status output.
    fn model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_into_text() {
        assert_eq!(Completion::Reply("hi".into()).into_text(), "hi");
    }

    #[test]
    fn test_failure_into_text_embeds_reason() {
        let text = Completion::Failed(InferenceError::Transport("connection refused".into()))
            .into_text();
        assert_eq!(
            text,
            "Error connecting to inference endpoint: connection refused"
        );
    }

    #[test]
    fn test_status_error_display() {
        let err = InferenceError::Status {
            status: 503,
            body: "loading model".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: loading model");
    }

    #[test]
    fn test_is_failure() {
        assert!(!Completion::Reply(String::new()).is_failure());
        assert!(Completion::Failed(InferenceError::Parse("x".into())).is_failure());
    }

    #[test]
    fn test_params_from_config() {
        let params = RequestParams::default();
        assert_eq!(params.model, "llama3.2:3b");
        assert_eq!(params.max_tokens, 512);
        assert_eq!(params.temperature, 0.1);
    }
}
