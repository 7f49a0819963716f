//! Core types for Llama-Wizard.
//!
//! Two shapes of conversation live here:
//! - [`Exchange`] — one user turn and its reply, the unit the session store and
//!   the presentation layer work with.
//! - [`Message`] — a role-tagged chat message in the OpenAI chat completions
//!   format, the unit the inference endpoint works with.

use serde::{Deserialize, Serialize};

/// Reply text used when the endpoint answers with JSON that carries no content.
pub const NO_RESPONSE: &str = "No response";

// ─────────────────────────────────────────────
// Exchange (one turn of visible history)
// ─────────────────────────────────────────────

/// One completed turn: the user's text and the assistant's reply.
///
/// Serialized as a two-element array `["user text", "assistant text"]`, the
/// list-of-pairs shape chat widgets render directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
}

impl Exchange {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Exchange {
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

impl From<(String, String)> for Exchange {
    fn from((user, assistant): (String, String)) -> Self {
        Exchange { user, assistant }
    }
}

impl From<Exchange> for (String, String) {
    fn from(exchange: Exchange) -> Self {
        (exchange.user, exchange.assistant)
    }
}

// ─────────────────────────────────────────────
// Messages (OpenAI chat completions format)
// ─────────────────────────────────────────────

/// A chat message in the OpenAI format.
///
/// Each variant maps to a `role` field value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role")]
pub enum Message {
    #[serde(rename = "system")]
    System { content: String },

    #[serde(rename = "user")]
    User { content: String },

    #[serde(rename = "assistant")]
    Assistant { content: String },
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant {
            content: content.into(),
        }
    }

    /// The text content regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Message::System { content }
            | Message::User { content }
            | Message::Assistant { content } => content,
        }
    }
}

/// Flatten visible history plus the new user text into the role-tagged list
/// the endpoint expects: `user, assistant` for every exchange, then `user`.
pub fn conversation_messages(history: &[Exchange], new_user_message: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 1);
    for exchange in history {
        messages.push(Message::user(exchange.user.as_str()));
        messages.push(Message::assistant(exchange.assistant.as_str()));
    }
    messages.push(Message::user(new_user_message));
    messages
}

// ─────────────────────────────────────────────
// Chat completion request / response
// ─────────────────────────────────────────────

/// Request body for an OpenAI-compatible chat completion API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub model: String,
}

/// Raw chat completion response. Every field is optional: local servers are
/// loose about the shape, and a missing piece means "no content", not an error.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<ChatChoice>>,
}

/// A single choice in a chat completion response.
#[derive(Debug, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ReplyMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The assistant message within a chat completion choice.
#[derive(Debug, Default, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if any.
    pub fn into_content(self) -> Option<String> {
        self.choices?
            .into_iter()
            .next()?
            .message?
            .content
    }

    /// Content of the first choice, or [`NO_RESPONSE`].
    pub fn reply_text(self) -> String {
        self.into_content()
            .unwrap_or_else(|| NO_RESPONSE.to_string())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
