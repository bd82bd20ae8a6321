//! Ask Team use case: the interactive driver.
//!
//! Resolves the caller's session, binds a fresh session-scoped aggregator
//! to it and turns the report stream into plain text. The caller always
//! gets text back: failures become a short apology.

use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::run_team::{RunTeamInput, RunTeamUseCase};
use crew_domain::SessionId;
use crew_domain::util::preview;
use futures::stream::{self, Stream, StreamExt};
use std::fmt::Display;
use std::pin::Pin;
use tracing::{debug, info, warn};

/// Text chunks for the caller, in order
pub type TextStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// The degraded reply sent in place of a report
pub fn apology(error: &dyn Display) -> String {
    format!("I'm sorry, but something went wrong. ({})", error)
}

pub struct AskTeamUseCase<G: LlmGateway + 'static> {
    team: RunTeamUseCase<G>,
}

impl<G: LlmGateway + 'static> Clone for AskTeamUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            team: self.team.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> AskTeamUseCase<G> {
    pub fn new(team: RunTeamUseCase<G>) -> Self {
        Self { team }
    }

    /// The effective session for a caller-supplied token.
    ///
    /// Never fails: an absent token is minted, a malformed one is replaced.
    pub fn resolve_session(&self, raw: Option<&str>) -> SessionId {
        let (session, rejected) = SessionId::resolve(raw);
        match rejected {
            Some(e) => warn!("Rejected session token ({}); using {}", e, session),
            None if raw.is_none_or(|r| r.trim().is_empty()) => {
                debug!("Minted session {}", session)
            }
            None => {}
        }
        session
    }

    /// Stream the crew's answer to `input` within `session`
    pub fn ask(&self, session: &SessionId, input: Option<&str>) -> TextStream {
        let Some(input) = input.map(str::trim).filter(|s| !s.is_empty()) else {
            warn!("Session {}: request without input", session);
            return Box::pin(stream::once(async { apology(&"no input was provided") }));
        };

        info!("Session {}: {}", session, preview(input, 80));
        let reports = self
            .team
            .for_session(session.clone())
            .execute_streaming(RunTeamInput::query(input));

        let session = session.clone();
        Box::pin(reports.map(move |chunk| match chunk {
            Ok(text) => text,
            Err(e) => {
                warn!("Session {}: run failed: {}", session, e);
                apology(&e)
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::test_support::{Behavior, RecordingMemory, StubGateway, Target};
    use crew_domain::{ReviewerRole, TeamSpec};
    use std::sync::Arc;

    fn ask_team(gateway: StubGateway) -> AskTeamUseCase<StubGateway> {
        let memory = Arc::new(RecordingMemory::default());
        AskTeamUseCase::new(
            RunTeamUseCase::new(Arc::new(gateway), TeamSpec::default()).with_memory(memory),
        )
    }

    async fn answer(uc: &AskTeamUseCase<StubGateway>, session: &SessionId, input: &str) -> String {
        uc.ask(session, Some(input)).collect::<Vec<_>>().await.concat()
    }

    #[test]
    fn test_supplied_session_is_kept() {
        let uc = ask_team(StubGateway::new());
        assert_eq!(uc.resolve_session(Some("abc-123")).as_str(), "abc-123");
    }

    #[test]
    fn test_absent_sessions_are_distinct() {
        let uc = ask_team(StubGateway::new());
        let a = uc.resolve_session(None);
        let b = uc.resolve_session(None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_session_is_replaced() {
        let uc = ask_team(StubGateway::new());
        let session = uc.resolve_session(Some("bad token\twith spaces"));
        assert_ne!(session.as_str(), "bad token\twith spaces");
        assert!(!session.as_str().is_empty());
    }

    #[tokio::test]
    async fn test_answer_is_full_report() {
        let uc = ask_team(StubGateway::new());
        let session = uc.resolve_session(None);

        let text = answer(&uc, &session, "Review my loop").await;

        assert!(text.starts_with("# Code Review Report"));
        assert!(text.contains("Overall summary."));
    }

    #[tokio::test]
    async fn test_total_failure_becomes_apology() {
        let mut gateway = StubGateway::new();
        for role in ReviewerRole::ALL {
            gateway = gateway.with(
                Target::Member(role),
                Behavior::Fail(GatewayError::ConnectionError("refused".into())),
            );
        }
        let uc = ask_team(gateway);
        let session = uc.resolve_session(None);

        let text = answer(&uc, &session, "anything").await;

        assert!(text.starts_with("I'm sorry, but something went wrong. (Every reviewer failed"));
    }

    #[tokio::test]
    async fn test_missing_input_gets_apology() {
        let uc = ask_team(StubGateway::new());
        let session = uc.resolve_session(None);

        let text: Vec<String> = uc.ask(&session, None).collect().await;

        assert_eq!(
            text,
            vec!["I'm sorry, but something went wrong. (no input was provided)".to_string()]
        );
    }

    #[tokio::test]
    async fn test_session_continuity_across_asks() {
        let uc = ask_team(StubGateway::new().with(Target::Lead, Behavior::Echo));
        let session = uc.resolve_session(Some("continuity"));

        answer(&uc, &session, "The deploy target is Lisbon.").await;
        let second = answer(&uc, &session, "Where do we deploy?").await;
        let stranger = answer(&uc, &uc.resolve_session(None), "Where do we deploy?").await;

        assert!(second.contains("The deploy target is Lisbon."));
        assert!(!stranger.contains("The deploy target is Lisbon."));
    }
}
