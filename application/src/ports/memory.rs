//! Session memory port
//!
//! One store is shared by the whole process. Entries are keyed by
//! [`SessionId`]; a session never observes another session's messages.

use async_trait::async_trait;
use crew_domain::{Message, SessionId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Memory store unavailable: {0}")]
    Unavailable(String),
}

/// Conversational memory shared across sessions
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Messages recorded for `session`, oldest first. Unknown sessions are empty.
    async fn history(&self, session: &SessionId) -> Result<Vec<Message>, MemoryError>;

    /// Append messages to `session`, creating it on first use.
    async fn append(&self, session: &SessionId, messages: Vec<Message>) -> Result<(), MemoryError>;
}

/// Memory that remembers nothing (batch runs, tests)
pub struct NoMemory;

#[async_trait]
impl MemoryStore for NoMemory {
    async fn history(&self, _session: &SessionId) -> Result<Vec<Message>, MemoryError> {
        Ok(Vec::new())
    }

    async fn append(&self, _session: &SessionId, _messages: Vec<Message>) -> Result<(), MemoryError> {
        Ok(())
    }
}
