//! Turn processor — one user message in, one exchange appended.
//!
//! `Idle → AwaitingReply → Idle`. Turns are not serialized against each other;
//! two concurrent turns on the same session are last-writer-wins in the store.

use serde::Serialize;
use tracing::{debug, info, warn};

use llamawiz_core::types::Exchange;
use llamawiz_providers::{Completion, InferenceError};

use crate::lifecycle::SessionListEntry;
use crate::service::{ChatContext, ChatService};

/// How a turn ended.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnStatus {
    /// Blank input; nothing was sent.
    Skipped,
    /// The endpoint replied.
    Replied,
    /// The endpoint failed; the error text was recorded as the reply.
    Failed(InferenceError),
}

/// State handed back to the presentation layer after a turn.
#[derive(Clone, Debug, Serialize)]
pub struct TurnOutput {
    pub history: Vec<Exchange>,
    /// New contents of the input box; always cleared.
    pub input: String,
    pub sessions: Vec<SessionListEntry>,
    #[serde(skip)]
    pub status: TurnStatus,
}

impl ChatService {
    /// Submit `user_text` against the visible `history`.
    ///
    /// The reply (or the error text standing in for it) is appended to the
    /// history, and the session current in `ctx`, if any, is saved.
    pub async fn submit_turn(
        &self,
        ctx: &ChatContext,
        user_text: &str,
        mut history: Vec<Exchange>,
    ) -> TurnOutput {
        if user_text.trim().is_empty() {
            debug!("blank input ignored");
            return TurnOutput {
                history,
                input: String::new(),
                sessions: self.list_sessions(ctx),
                status: TurnStatus::Skipped,
            };
        }

        debug!(
            session = ctx.current().map(|id| id.as_str()).unwrap_or("-"),
            exchanges = history.len(),
            "awaiting reply"
        );

        let completion = self.client.complete(&history, user_text).await;
        let status = match &completion {
            Completion::Reply(_) => TurnStatus::Replied,
            Completion::Failed(err) => {
                warn!(error = %err, "turn completed with inference error");
                TurnStatus::Failed(err.clone())
            }
        };

        history.push(Exchange::new(user_text, completion.into_text()));

        if let Some(id) = ctx.current() {
            self.store.upsert(id, &history);
            info!(session = %id, exchanges = history.len(), "turn saved");
        }

        TurnOutput {
            sessions: self.list_sessions(ctx),
            history,
            input: String::new(),
            status,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
