//! Process-wide [`MemoryStore`] held in RAM
//!
//! Sessions live for the life of the process. Each keeps at most
//! `max_messages` of its most recent messages.

use async_trait::async_trait;
use crew_application::{MemoryError, MemoryStore};
use crew_domain::{Message, SessionId};
use std::collections::HashMap;
use tokio::sync::RwLock;

pub const DEFAULT_MAX_MESSAGES: usize = 20;

pub struct InMemoryStore {
    sessions: RwLock<HashMap<SessionId, Vec<Message>>>,
    max_messages: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}

impl InMemoryStore {
    pub fn new(max_messages: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_messages: max_messages.max(2),
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn history(&self, session: &SessionId) -> Result<Vec<Message>, MemoryError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(session)
            .cloned()
            .unwrap_or_default())
    }

    async fn append(&self, session: &SessionId, messages: Vec<Message>) -> Result<(), MemoryError> {
        let mut sessions = self.sessions.write().await;
        let history = sessions.entry(session.clone()).or_default();
        history.extend(messages);
        if history.len() > self.max_messages {
            let excess = history.len() - self.max_messages;
            history.drain(..excess);
        }
        Ok(())
    }
}
