//! Run Team use case: the lead aggregator.
//!
//! One run broadcasts the same prompt to every member, collects their
//! findings concurrently, asks the lead for an executive summary and
//! assembles a [`TeamReport`] whose sections follow declared role order.
//!
//! # Failure handling
//!
//! | What failed | Outcome |
//! |-------------|---------|
//! | Some members | Report with a missing-section marker per failed member |
//! | Every member | [`RunTeamError::AllMembersFailed`] |
//! | The lead | Report with a locally assembled fallback summary |
//!
//! # Sessions
//!
//! A use case value is cheap to clone. [`RunTeamUseCase::for_session`]
//! returns a fresh aggregator bound to one session; the shared value is
//! never mutated, so concurrent requests cannot see each other's session.

pub mod reviewer;
pub mod stream;
pub mod types;

pub use reviewer::ReviewerAgent;
pub use stream::ReportStream;
pub use types::{RunTeamError, RunTeamInput};

use crate::config::TeamParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::memory::{MemoryStore, NoMemory};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crew_domain::util::preview;
use crew_domain::{
    MemberFinding, Message, Phase, PromptTemplate, SessionId, Synthesis, TeamReport, TeamSpec,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Use case for running the crew over one prompt
pub struct RunTeamUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    team: TeamSpec,
    members: Vec<ReviewerAgent<G>>,
    params: TeamParams,
    memory: Arc<dyn MemoryStore>,
    logger: Arc<dyn ConversationLogger>,
    session: Option<SessionId>,
}

impl<G: LlmGateway + 'static> Clone for RunTeamUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            team: self.team.clone(),
            members: self.members.clone(),
            params: self.params,
            memory: Arc::clone(&self.memory),
            logger: Arc::clone(&self.logger),
            session: self.session.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> RunTeamUseCase<G> {
    pub fn new(gateway: Arc<G>, team: TeamSpec) -> Self {
        let members = team
            .members()
            .iter()
            .map(|spec| ReviewerAgent::new(spec, Arc::clone(&gateway)))
            .collect();
        Self {
            gateway,
            team,
            members,
            params: TeamParams::default(),
            memory: Arc::new(NoMemory),
            logger: Arc::new(NoConversationLogger),
            session: None,
        }
    }

    pub fn with_params(mut self, params: TeamParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_memory(mut self, memory: Arc<dyn MemoryStore>) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// A fresh aggregator bound to `session`
    pub fn for_session(&self, session: SessionId) -> Self {
        let mut scoped = self.clone();
        scoped.session = Some(session);
        scoped
    }

    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    pub fn team(&self) -> &TeamSpec {
        &self.team
    }

    pub fn params(&self) -> &TeamParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunTeamInput) -> Result<TeamReport, RunTeamError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunTeamInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<TeamReport, RunTeamError> {
        let history = self.load_history().await;

        let findings = self.phase_review(&input, &history, progress).await?;
        let synthesis = self
            .phase_synthesis(&input, &findings, &history, progress)
            .await;

        let report = TeamReport::new(findings, synthesis);
        self.remember(&input, &report).await;
        self.log_run(&input, &report);
        Ok(report)
    }

    /// Review phase: broadcast the prompt to every member in parallel.
    ///
    /// Returns one finding per member, in declared role order.
    async fn phase_review(
        &self,
        input: &RunTeamInput,
        history: &[Message],
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<MemberFinding>, RunTeamError> {
        if self.members.is_empty() {
            return Err(RunTeamError::NoMembers);
        }

        info!("Review phase: broadcasting to {} members", self.members.len());
        progress.on_phase_start(&Phase::Review, self.members.len());

        let prompt: Arc<str> = PromptTemplate::member_prompt(&input.prompt, history).into();
        debug!("Broadcast prompt: {}", preview(&prompt, 200));

        let mut join_set = JoinSet::new();
        for agent in &self.members {
            let agent = agent.clone();
            let prompt = Arc::clone(&prompt);
            let timeout = self.params.member_timeout;

            join_set.spawn(async move {
                let result = agent.review(&prompt, timeout).await;
                (agent.role(), result)
            });
        }

        let mut findings = Vec::with_capacity(self.members.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((role, Ok(content))) => {
                    info!("{} responded", role.display_name());
                    progress.on_member_complete(&Phase::Review, role, true);
                    findings.push(MemberFinding::success(role, content));
                }
                Ok((role, Err(e))) => {
                    warn!("{} failed: {}", role.display_name(), e);
                    progress.on_member_complete(&Phase::Review, role, false);
                    findings.push(MemberFinding::failure(role, e.to_string()));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        // A panicked task leaves no finding behind; its section must still appear.
        for agent in &self.members {
            if !findings.iter().any(|f| f.role == agent.role()) {
                progress.on_member_complete(&Phase::Review, agent.role(), false);
                findings.push(MemberFinding::failure(agent.role(), "review task aborted"));
            }
        }
        findings.sort_by_key(|f| f.role);
        progress.on_phase_complete(&Phase::Review);

        if findings.iter().all(|f| !f.success) {
            let errors = findings
                .iter()
                .map(|f| format!("{}: {}", f.role, f.error.as_deref().unwrap_or("unknown")))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(RunTeamError::AllMembersFailed(errors));
        }

        Ok(findings)
    }

    /// Synthesis phase: the lead writes the executive summary
    async fn phase_synthesis(
        &self,
        input: &RunTeamInput,
        findings: &[MemberFinding],
        history: &[Message],
        progress: &dyn ProgressNotifier,
    ) -> Synthesis {
        info!("Synthesis phase");
        progress.on_phase_start(&Phase::Synthesis, 1);

        let lead = self.team.lead();
        let call = async {
            let session = self
                .gateway
                .create_session_with_system_prompt(lead, &PromptTemplate::lead_system(&self.team.roles()))
                .await?;
            session
                .send(&PromptTemplate::summary_prompt(&input.prompt, findings, history))
                .await
        };

        let result = tokio::time::timeout(self.params.synthesis_timeout, call)
            .await
            .map_err(|_| GatewayError::Timeout)
            .and_then(std::convert::identity);

        let synthesis = match result {
            Ok(summary) if !summary.trim().is_empty() => {
                Synthesis::new(lead.to_string(), summary.trim())
            }
            Ok(_) => {
                warn!("Lead returned an empty summary");
                Synthesis::fallback(lead.to_string(), findings, "empty summary returned")
            }
            Err(e) => {
                warn!("Lead synthesis failed: {}", e);
                Synthesis::fallback(lead.to_string(), findings, &e.to_string())
            }
        };

        progress.on_phase_complete(&Phase::Synthesis);
        synthesis
    }

    async fn load_history(&self) -> Vec<Message> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        match self.memory.history(session).await {
            Ok(history) => {
                debug!("Session {} has {} remembered messages", session, history.len());
                history
            }
            Err(e) => {
                warn!("Could not load memory for session {}: {}", session, e);
                Vec::new()
            }
        }
    }

    async fn remember(&self, input: &RunTeamInput, report: &TeamReport) {
        let Some(session) = &self.session else {
            return;
        };
        let messages = vec![
            Message::user(&input.request),
            Message::assistant(report.to_markdown()),
        ];
        if let Err(e) = self.memory.append(session, messages).await {
            warn!("Could not record memory for session {}: {}", session, e);
        }
    }

    fn log_run(&self, input: &RunTeamInput, report: &TeamReport) {
        let missing: Vec<String> = report
            .failed_findings()
            .map(|f| f.role.to_string())
            .collect();
        info!(
            "Report ready: {} of {} sections reviewed",
            report.successful_findings().count(),
            report.findings().len()
        );
        if !missing.is_empty() {
            warn!("Report is missing sections from: {}", missing.join(", "));
        }

        self.logger.log(ConversationEvent::new(
            "team_run",
            serde_json::json!({
                "session": self.session.as_ref().map(SessionId::as_str),
                "request": input.request,
                "missing": missing,
                "findings": report.findings(),
                "synthesis": report.synthesis(),
            }),
        ));
    }
}
