//! Test doubles shared by the lifecycle and turn tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use llamawiz_core::session::SessionStore;
use llamawiz_core::types::Exchange;
use llamawiz_providers::{Completion, InferenceClient};

use crate::service::ChatService;

/// Replies from a queue, falling back to `"echo: <message>"`, and records
/// every call it receives.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Completion>>,
    pub calls: Mutex<Vec<(Vec<Exchange>, String)>>,
}

impl ScriptedClient {
    pub fn with_replies(replies: impl IntoIterator<Item = Completion>) -> Self {
        ScriptedClient {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl InferenceClient for ScriptedClient {
    async fn complete(&self, history: &[Exchange], new_user_message: &str) -> Completion {
        self.calls
            .lock()
            .unwrap()
            .push((history.to_vec(), new_user_message.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Completion::Reply(format!("echo: {new_user_message}")))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

pub fn service_with(client: ScriptedClient) -> (ChatService, Arc<ScriptedClient>) {
    let client = Arc::new(client);
    let service = ChatService::new(Arc::new(SessionStore::default()), client.clone());
    (service, client)
}
