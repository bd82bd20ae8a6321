//! Deterministic stand-ins for the application ports.

use crate::ports::artifact_store::{ArtifactError, ArtifactStore};
use crate::ports::change_source::{ChangeSource, ChangeSourceError};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession, StreamHandle};
use crate::ports::memory::{MemoryError, MemoryStore};
use async_trait::async_trait;
use crew_domain::{Message, Model, ReviewerRole, SessionId, StreamEvent};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Who a session was opened for, recognised by its system prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Member(ReviewerRole),
    Lead,
}

impl Target {
    fn from_system_prompt(system_prompt: &str) -> Self {
        ReviewerRole::ALL
            .into_iter()
            .find(|role| role.instructions() == system_prompt)
            .map(Target::Member)
            .unwrap_or(Target::Lead)
    }

    fn default_behavior(self) -> Behavior {
        match self {
            Target::Member(role) => Behavior::Reply(format!("{} findings", role)),
            Target::Lead => Behavior::Reply("Overall summary.".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Behavior {
    Reply(String),
    ReplyAfter(Duration, String),
    /// Reply with the prompt that was sent
    Echo,
    /// Fail only for prompts containing the marker
    FailWhenContains(String, GatewayError),
    Fail(GatewayError),
    Hang,
    Stream(Vec<String>),
    StreamThenFail(Vec<String>, String),
    /// Stream the chunks, then stall until the reader goes away
    StreamThenHang(Vec<String>),
}

type PromptLog = Arc<Mutex<Vec<(Target, String)>>>;

pub struct StubGateway {
    behaviors: HashMap<Target, Behavior>,
    prompts: PromptLog,
}

impl StubGateway {
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with(mut self, target: Target, behavior: Behavior) -> Self {
        self.behaviors.insert(target, behavior);
        self
    }

    /// Every prompt sent so far, in arrival order
    pub fn prompts(&self) -> Vec<(Target, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for StubGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let target = Target::from_system_prompt(system_prompt);
        let behavior = self
            .behaviors
            .get(&target)
            .cloned()
            .unwrap_or_else(|| target.default_behavior());
        Ok(Box::new(StubSession {
            model: model.clone(),
            target,
            behavior,
            prompts: Arc::clone(&self.prompts),
        }))
    }
}

struct StubSession {
    model: Model,
    target: Target,
    behavior: Behavior,
    prompts: PromptLog,
}

#[async_trait]
impl LlmSession for StubSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.prompts
            .lock()
            .unwrap()
            .push((self.target, content.to_string()));
        match &self.behavior {
            Behavior::Reply(text) => Ok(text.clone()),
            Behavior::ReplyAfter(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
            Behavior::Echo => Ok(content.to_string()),
            Behavior::FailWhenContains(marker, error) => {
                if content.contains(marker.as_str()) {
                    Err(error.clone())
                } else {
                    Ok(format!("{:?} findings", self.target))
                }
            }
            Behavior::Fail(error) => Err(error.clone()),
            Behavior::Hang | Behavior::StreamThenHang(_) => std::future::pending().await,
            Behavior::Stream(chunks) => Ok(chunks.concat()),
            Behavior::StreamThenFail(_, error) => Err(GatewayError::RequestFailed(error.clone())),
        }
    }

    async fn send_streaming(&self, content: &str) -> Result<StreamHandle, GatewayError> {
        if let Behavior::StreamThenHang(chunks) = &self.behavior {
            let (tx, rx) = mpsc::channel(chunks.len() + 1);
            for chunk in chunks {
                let _ = tx.send(StreamEvent::Delta(chunk.clone())).await;
            }
            tokio::spawn(async move { tx.closed().await });
            return Ok(StreamHandle::new(rx));
        }

        let (events, tail) = match &self.behavior {
            Behavior::Stream(chunks) => (
                chunks.clone(),
                StreamEvent::Completed(chunks.concat()),
            ),
            Behavior::StreamThenFail(chunks, error) => {
                (chunks.clone(), StreamEvent::Error(error.clone()))
            }
            _ => {
                let text = self.send(content).await?;
                (Vec::new(), StreamEvent::Completed(text))
            }
        };

        let (tx, rx) = mpsc::channel(events.len() + 1);
        for chunk in events {
            let _ = tx.send(StreamEvent::Delta(chunk)).await;
        }
        let _ = tx.send(tail).await;
        Ok(StreamHandle::new(rx))
    }
}

/// Memory that keeps everything, for inspection
#[derive(Default)]
pub struct RecordingMemory {
    sessions: Mutex<HashMap<SessionId, Vec<Message>>>,
}

impl RecordingMemory {
    pub fn messages(&self, session: &SessionId) -> Vec<Message> {
        self.sessions
            .lock()
            .unwrap()
            .get(session)
            .cloned()
            .unwrap_or_default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl MemoryStore for RecordingMemory {
    async fn history(&self, session: &SessionId) -> Result<Vec<Message>, MemoryError> {
        Ok(self.messages(session))
    }

    async fn append(&self, session: &SessionId, messages: Vec<Message>) -> Result<(), MemoryError> {
        self.sessions
            .lock()
            .unwrap()
            .entry(session.clone())
            .or_default()
            .extend(messages);
        Ok(())
    }
}

/// Memory that always fails
pub struct BrokenMemory;

#[async_trait]
impl MemoryStore for BrokenMemory {
    async fn history(&self, _session: &SessionId) -> Result<Vec<Message>, MemoryError> {
        Err(MemoryError::Unavailable("offline".into()))
    }

    async fn append(&self, _session: &SessionId, _messages: Vec<Message>) -> Result<(), MemoryError> {
        Err(MemoryError::Unavailable("offline".into()))
    }
}

/// Fixed change list
pub struct StaticChanges(pub Result<Vec<String>, ChangeSourceError>);

#[async_trait]
impl ChangeSource for StaticChanges {
    async fn changed_files(
        &self,
        _before: &str,
        _after: &str,
    ) -> Result<Vec<String>, ChangeSourceError> {
        self.0.clone()
    }
}

/// In-memory files plus captured reports
#[derive(Default)]
pub struct MemoryArtifacts {
    files: HashMap<String, String>,
    reports: Mutex<Vec<(String, String)>>,
}

impl MemoryArtifacts {
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    /// Written reports as `(name, content)`, in write order
    pub fn reports(&self) -> Vec<(String, String)> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifacts {
    async fn read(&self, path: &str) -> Result<String, ArtifactError> {
        self.files.get(path).cloned().ok_or_else(|| ArtifactError::Read {
            path: path.to_string(),
            message: "No such file or directory".to_string(),
        })
    }

    async fn write_report(&self, name: &str, content: &str) -> Result<String, ArtifactError> {
        self.reports
            .lock()
            .unwrap()
            .push((name.to_string(), content.to_string()));
        Ok(format!("reports/{}", name))
    }
}

/// Keeps every transcript event as `(type, payload)`
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<(&'static str, serde_json::Value)> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}
