//! Session lifecycle — start, list, and load conversations.
//!
//! None of these operations fail. A lookup miss is an empty history, and a new
//! session only reaches the store once its first turn completes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use llamawiz_core::session::SessionId;
use llamawiz_core::types::Exchange;
use llamawiz_core::utils;

use crate::service::{ChatContext, ChatService};

/// One row of the session listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionListEntry {
    pub id: SessionId,
    pub title: String,
    /// Relative age, e.g. `"5m ago"`.
    pub label: String,
    pub updated_at: DateTime<Utc>,
    pub is_current: bool,
}

/// Result of starting a session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewSession {
    pub id: SessionId,
    pub history: Vec<Exchange>,
    pub sessions: Vec<SessionListEntry>,
}

/// Result of loading a session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoadedSession {
    /// The session that became current, if the lookup hit.
    pub id: Option<SessionId>,
    pub history: Vec<Exchange>,
    pub sessions: Vec<SessionListEntry>,
}

impl ChatService {
    /// Start a fresh session and make it current for `ctx`.
    pub fn new_session(&self, ctx: &mut ChatContext) -> NewSession {
        let id = SessionId::generate();
        ctx.current = Some(id.clone());
        info!(session = %id, "new session");

        NewSession {
            id,
            history: Vec::new(),
            sessions: self.list_sessions(ctx),
        }
    }

    /// All stored sessions, most recently updated first.
    pub fn list_sessions(&self, ctx: &ChatContext) -> Vec<SessionListEntry> {
        self.list_sessions_at(ctx, Utc::now())
    }

    /// Same as [`list_sessions`](Self::list_sessions) with labels relative to `now`.
    pub fn list_sessions_at(&self, ctx: &ChatContext, now: DateTime<Utc>) -> Vec<SessionListEntry> {
        self.store
            .recent()
            .into_iter()
            .map(|(id, record)| SessionListEntry {
                is_current: ctx.current() == Some(&id),
                label: utils::format_relative(now, record.last_updated),
                title: record.title,
                updated_at: record.last_updated,
                id,
            })
            .collect()
    }

    /// Load a session by id, or failing that by title.
    ///
    /// On a hit the session becomes current for `ctx`. On a miss the history
    /// is empty and `ctx` has no current session, so a turn sent against that
    /// empty history is not stored over the previous session.
    pub fn load_session(&self, ctx: &mut ChatContext, identifier: &str) -> LoadedSession {
        let identifier = identifier.trim();

        let found = if identifier.is_empty() {
            None
        } else if let Some(record) = self.store.get(identifier) {
            Some((SessionId::from(identifier), record))
        } else {
            self.store.find_by_title(identifier)
        };

        match found {
            Some((id, record)) => {
                debug!(session = %id, exchanges = record.history.len(), "session loaded");
                ctx.current = Some(id.clone());
                LoadedSession {
                    id: Some(id),
                    history: record.history,
                    sessions: self.list_sessions(ctx),
                }
            }
            None => {
                debug!(identifier, "no session matches, returning empty history");
                ctx.current = None;
                LoadedSession {
                    id: None,
                    history: Vec::new(),
                    sessions: self.list_sessions(ctx),
                }
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
