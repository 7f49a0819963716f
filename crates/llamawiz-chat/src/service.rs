//! Chat service — the shared state every request handler works against.

use std::sync::Arc;

use llamawiz_core::session::{SessionId, SessionStore};
use llamawiz_providers::InferenceClient;

/// Per-connection state: which session the user is looking at.
///
/// Each browser tab / REPL owns one. It is never shared, so two users can
/// never overwrite each other's "current session".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatContext {
    pub current: Option<SessionId>,
}

impl ChatContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SessionId> {
        self.current.as_ref()
    }
}

/// Store plus inference client. Cheap to share behind an `Arc`.
pub struct ChatService {
    pub(crate) store: Arc<SessionStore>,
    pub(crate) client: Arc<dyn InferenceClient>,
}

impl ChatService {
    pub fn new(store: Arc<SessionStore>, client: Arc<dyn InferenceClient>) -> Self {
        ChatService { store, client }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Model identifier of the underlying client.
    pub fn model(&self) -> &str {
        self.client.model()
    }
}
