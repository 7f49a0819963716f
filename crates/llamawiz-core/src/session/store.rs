//! In-memory session store.
//!
//! Thread-safe via `RwLock` — multiple readers, exclusive writer. The lock is
//! only ever held for map access, never across an inference call.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::id::SessionId;
use crate::types::Exchange;
use crate::utils;

/// Title shown for a session with no history.
pub const NEW_CHAT_TITLE: &str = "New Chat";

/// Characters of the first user message kept in a session title.
pub const DEFAULT_TITLE_MAX_CHARS: usize = 30;

/// Derive a session title from the first user message.
pub fn derive_title(history: &[Exchange], max_chars: usize) -> String {
    match history.first() {
        Some(first) => utils::truncate_with_ellipsis(&first.user, max_chars),
        None => NEW_CHAT_TITLE.to_string(),
    }
}

// ─────────────────────────────────────────────
// SessionRecord
// ─────────────────────────────────────────────

/// A stored conversation.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionRecord {
    /// Exchanges in conversation order.
    pub history: Vec<Exchange>,
    /// Derived from `history[0]`; not unique across sessions.
    pub title: String,
    /// Time of the most recent completed turn.
    pub last_updated: DateTime<Utc>,
}

// ─────────────────────────────────────────────
// SessionStore
// ─────────────────────────────────────────────

/// Process-wide map from session id to record.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionRecord>>,
    title_max_chars: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE_MAX_CHARS)
    }
}

impl SessionStore {
    /// Create an empty store whose titles keep `title_max_chars` characters.
    pub fn new(title_max_chars: usize) -> Self {
        SessionStore {
            sessions: RwLock::new(HashMap::new()),
            title_max_chars,
        }
    }

    /// Insert or replace the record for `id`, stamped with the current time.
    pub fn upsert(&self, id: &SessionId, history: &[Exchange]) -> SessionRecord {
        self.upsert_at(id, history, Utc::now())
    }

    /// Insert or replace the record for `id` with an explicit timestamp.
    pub fn upsert_at(
        &self,
        id: &SessionId,
        history: &[Exchange],
        at: DateTime<Utc>,
    ) -> SessionRecord {
        let record = SessionRecord {
            history: history.to_vec(),
            title: derive_title(history, self.title_max_chars),
            last_updated: at,
        };

        self.write().insert(id.clone(), record.clone());
        debug!(
            session = %id,
            exchanges = record.history.len(),
            title = %record.title,
            "session record updated"
        );
        record
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<SessionRecord> {
        self.read().get(id).cloned()
    }

    /// Whether a record exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    /// Most recently updated session whose title equals `title`.
    pub fn find_by_title(&self, title: &str) -> Option<(SessionId, SessionRecord)> {
        self.recent()
            .into_iter()
            .find(|(_, record)| record.title == title)
    }

    /// All records, newest `last_updated` first. Ties are ordered by id,
    /// descending, so the listing is deterministic.
    pub fn recent(&self) -> Vec<(SessionId, SessionRecord)> {
        let mut entries: Vec<(SessionId, SessionRecord)> = self
            .read()
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect();

        entries.sort_by(|(a_id, a), (b_id, b)| {
            b.last_updated
                .cmp(&a.last_updated)
                .then_with(|| b_id.cmp(a_id))
        });
        entries
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn title_max_chars(&self) -> usize {
        self.title_max_chars
    }

    // A panic in another holder leaves the map itself intact.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<SessionId, SessionRecord>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, SessionRecord>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
