//! Reviewer agent: one crew member bound to its role policy.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crew_domain::{MemberSpec, Model, ReviewerRole};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A stateless crew member: role instructions plus a backend.
///
/// Holds no per-request state, so one agent can serve any number of runs.
pub struct ReviewerAgent<G: LlmGateway + 'static> {
    role: ReviewerRole,
    model: Model,
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> Clone for ReviewerAgent<G> {
    fn clone(&self) -> Self {
        Self {
            role: self.role,
            model: self.model.clone(),
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<G: LlmGateway + 'static> ReviewerAgent<G> {
    pub fn new(spec: &MemberSpec, gateway: Arc<G>) -> Self {
        Self {
            role: spec.role,
            model: spec.model.clone(),
            gateway,
        }
    }

    pub fn role(&self) -> ReviewerRole {
        self.role
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Review `prompt` under this member's role policy.
    ///
    /// Exceeding `timeout` yields [`GatewayError::Timeout`]; every failure is
    /// returned to the caller.
    pub async fn review(&self, prompt: &str, timeout: Duration) -> Result<String, GatewayError> {
        debug!("{} reviewing with {}", self.role.display_name(), self.model);
        let call = async {
            let session = self
                .gateway
                .create_session_with_system_prompt(&self.model, self.role.instructions())
                .await?;
            session.send(prompt).await
        };

        let content = tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| GatewayError::Timeout)??;

        if content.trim().is_empty() {
            return Err(GatewayError::MalformedResponse(
                "empty review returned".to_string(),
            ));
        }
        Ok(content)
    }
}
