//! Per-connection chat contexts.
//!
//! A connection is one page load. Its id is handed out by `POST /api/connect`
//! and carried in every later request path. Connections nobody has touched
//! for [`DEFAULT_IDLE_TTL`] are dropped the next time a connection opens; a
//! page whose connection was dropped gets 404 and reconnects.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};

use llamawiz_chat::ChatContext;
use tracing::debug;
use uuid::Uuid;

/// How long an untouched connection is kept.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Entry {
    ctx: ChatContext,
    last_seen: Instant,
}

/// Map from connection id to that connection's [`ChatContext`].
pub struct ConnectionRegistry {
    entries: RwLock<HashMap<String, Entry>>,
    idle_ttl: Duration,
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that drops connections idle for longer than `idle_ttl`.
    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        ConnectionRegistry {
            entries: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Register a new connection and return its id.
    pub fn open(&self) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let now = Instant::now();

        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.last_seen) <= self.idle_ttl);
        let dropped = before - entries.len();

        entries.insert(
            id.clone(),
            Entry {
                ctx: ChatContext::new(),
                last_seen: now,
            },
        );
        debug!(connection = %id, dropped, open = entries.len(), "connection opened");
        id
    }

    /// Snapshot of a connection's context. Counts as activity.
    pub fn get(&self, id: &str) -> Option<ChatContext> {
        self.update(id, |ctx| ctx.clone())
    }

    /// Run `f` against a connection's context under the write lock.
    ///
    /// `f` must not block; the chat turn itself runs on a snapshot from
    /// [`get`](Self::get) instead.
    pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut ChatContext) -> R) -> Option<R> {
        self.write().get_mut(id).map(|entry| {
            entry.last_seen = Instant::now();
            f(&mut entry.ctx)
        })
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_empty_context() {
        let registry = ConnectionRegistry::new();
        let id = registry.open();
        assert_eq!(registry.get(&id), Some(ChatContext::new()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_unique() {
        let registry = ConnectionRegistry::new();
        assert_ne!(registry.open(), registry.open());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_update_mutates_in_place() {
        let registry = ConnectionRegistry::new();
        let id = registry.open();

        registry.update(&id, |ctx| ctx.current = Some("chat_1".into()));

        assert_eq!(registry.get(&id).unwrap().current, Some("chat_1".into()));
    }

    #[test]
    fn test_unknown_connection() {
        let registry = ConnectionRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("nope").is_none());
        assert!(registry.update("nope", |_| ()).is_none());
    }

    #[test]
    fn test_idle_connections_dropped_on_open() {
        let registry = ConnectionRegistry::with_idle_ttl(Duration::from_millis(20));
        let stale = registry.open();
        std::thread::sleep(Duration::from_millis(60));

        let fresh = registry.open();

        assert_eq!(registry.len(), 1);
        assert!(registry.get(&stale).is_none());
        assert!(registry.get(&fresh).is_some());
    }

    #[test]
    fn test_active_connections_survive() {
        let registry = ConnectionRegistry::with_idle_ttl(Duration::from_secs(60));
        let a = registry.open();
        let b = registry.open();
        registry.open();

        assert_eq!(registry.len(), 3);
        assert!(registry.get(&a).is_some());
        assert!(registry.get(&b).is_some());
    }
}
