//! OpenAI-compatible LLM session
//!
//! The Chat Completions API is stateless, so the session keeps its own
//! message history and resends it on every call.

use super::sse::{SseDecoder, SseEvent};
use super::types::{self, ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use crew_application::{GatewayError, LlmSession, StreamHandle};
use crew_domain::{Model, StreamEvent};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

const STREAM_CHANNEL_CAPACITY: usize = 64;

pub struct OpenAiSession {
    client: reqwest::Client,
    endpoint: Arc<str>,
    api_key: Arc<str>,
    model: Model,
    max_tokens: Option<u32>,
    /// System prompt first, then alternating user/assistant turns
    messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl OpenAiSession {
    pub fn new(
        client: reqwest::Client,
        endpoint: Arc<str>,
        api_key: Arc<str>,
        model: Model,
        system_prompt: &str,
        max_tokens: Option<u32>,
    ) -> Self {
        let mut messages = Vec::new();
        if !system_prompt.is_empty() {
            messages.push(ChatMessage::system(system_prompt));
        }
        Self {
            client,
            endpoint,
            api_key,
            model,
            max_tokens,
            messages: Arc::new(Mutex::new(messages)),
        }
    }

    async fn post(
        &self,
        history: &[ChatMessage],
        turn: &ChatMessage,
        stream: bool,
    ) -> Result<reqwest::Response, GatewayError> {
        let request = ChatRequest {
            model: self.model.as_str(),
            messages: history.iter().chain(std::iter::once(turn)).collect(),
            max_completion_tokens: self.max_tokens,
            stream,
        };

        debug!(
            model = %self.model,
            messages = request.messages.len(),
            stream,
            "Calling chat completions"
        );

        let response = self
            .client
            .post(self.endpoint.as_ref())
            .bearer_auth(self.api_key.as_ref())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(types::status_error(status.as_u16(), &body));
        }
        Ok(response)
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let mut messages = self.messages.lock().await;
        let turn = ChatMessage::user(content);

        let response: ChatResponse = self
            .post(&messages, &turn, false)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        let text = response.into_text().ok_or_else(|| {
            GatewayError::MalformedResponse("response contained no choices".to_string())
        })?;

        messages.push(turn);
        messages.push(ChatMessage::assistant(text.clone()));
        Ok(text)
    }

    async fn send_streaming(&self, content: &str) -> Result<StreamHandle, GatewayError> {
        let turn = ChatMessage::user(content);
        let response = {
            let messages = self.messages.lock().await;
            self.post(&messages, &turn, true).await?
        };

        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        let messages = Arc::clone(&self.messages);

        tokio::spawn(async move {
            let mut bytes = response.bytes_stream();
            let mut decoder = SseDecoder::default();
            let mut text = String::new();

            'read: while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        return;
                    }
                };
                for event in decoder.feed(&chunk) {
                    match event {
                        SseEvent::Delta(delta) => {
                            text.push_str(&delta);
                            if tx.send(StreamEvent::Delta(delta)).await.is_err() {
                                return;
                            }
                        }
                        SseEvent::Done => break 'read,
                        SseEvent::Malformed(e) => {
                            let _ = tx.send(StreamEvent::Error(e)).await;
                            return;
                        }
                    }
                }
            }

            {
                let mut history = messages.lock().await;
                history.push(turn);
                history.push(ChatMessage::assistant(text.clone()));
            }
            let _ = tx.send(StreamEvent::Completed(text)).await;
        });

        Ok(StreamHandle::new(rx))
    }
}
