//! OpenAI-compatible Chat Completions provider
//!
//! Works with api.openai.com and any server speaking the same protocol
//! (set `[providers.openai] base_url`).

mod session;
mod sse;
mod types;

pub use session::OpenAiSession;

use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use crew_application::{GatewayError, LlmGateway, LlmSession};
use crew_domain::Model;
use std::sync::Arc;
use tracing::info;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// [`LlmGateway`] over the Chat Completions API
pub struct OpenAiGateway {
    client: reqwest::Client,
    endpoint: Arc<str>,
    api_key: Arc<str>,
    max_tokens: Option<u32>,
}

impl OpenAiGateway {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("code-crew/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;
        let api_key: String = api_key.into();

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_PATH).into(),
            api_key: api_key.into(),
            max_tokens: None,
        })
    }

    /// Build from `[providers.openai]`, resolving the API key.
    pub fn from_config(config: &FileOpenAiConfig) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            GatewayError::Unauthorized(format!(
                "no API key configured; set {} or [providers.openai] api_key",
                config.api_key_env
            ))
        })?;

        let gateway = Self::new(&config.base_url, api_key)?.with_max_tokens(config.max_tokens);
        info!(endpoint = %gateway.endpoint, "OpenAI-compatible provider initialized");
        Ok(gateway)
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        if model.is_empty() {
            return Err(GatewayError::ModelNotAvailable("empty model name".to_string()));
        }
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            Arc::clone(&self.endpoint),
            Arc::clone(&self.api_key),
            model.clone(),
            system_prompt,
            self.max_tokens,
        )))
    }
}
