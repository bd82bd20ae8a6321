//! Route handlers

use super::AppState;
use super::image::take_image;
use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use crew_application::LlmGateway;
use futures::StreamExt;
use serde::Deserialize;
use std::convert::Infallible;
use tracing::{debug, warn};

/// Request and response header carrying the session token
pub const SESSION_HEADER: &str = "x-session-id";

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Debug, Deserialize)]
pub(super) struct TeamQuery {
    input: Option<String>,
}

/// GET /: landing page
pub(super) async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /team?input=: stream the crew's report.
///
/// The session is resolved before anything else, so every response,
/// apologies included, carries `X-Session-ID`.
pub(super) async fn handle_team<G: LlmGateway + 'static>(
    State(state): State<AppState<G>>,
    headers: HeaderMap,
    query: Result<Query<TeamQuery>, QueryRejection>,
) -> Response {
    // Undecodable bytes survive the lossy decode as U+FFFD, so the token is
    // rejected and logged like any other malformed one.
    let supplied = headers
        .get(SESSION_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()));
    let session = state.ask.resolve_session(supplied.as_deref());

    let input = match query {
        Ok(Query(query)) => query.input,
        Err(rejection) => {
            warn!("Unreadable query string: {}", rejection);
            None
        }
    };

    let chunks = state.ask.ask(&session, input.as_deref());
    let body = Body::from_stream(chunks.map(Ok::<_, Infallible>));

    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(session.as_str()) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}

/// GET /image: hand out the generated image once
pub(super) async fn handle_image<G: LlmGateway + 'static>(
    State(state): State<AppState<G>>,
) -> Response {
    match take_image(&state.image_path).await {
        Ok(Some(uri)) => {
            debug!("Served and removed {}", state.image_path.display());
            uri.into_response()
        }
        Ok(None) => StatusCode::OK.into_response(),
        Err(e) => {
            warn!("Could not serve {}: {}", state.image_path.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crew_application::{
        AskTeamUseCase, GatewayError, LlmSession, RunTeamUseCase, StreamHandle,
    };
    use crew_domain::{Model, ReviewerRole, StreamEvent, TeamSpec};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    /// Replies with a fixed text, or fails every call
    struct FixedGateway {
        reply: Option<&'static str>,
        /// The lead streams "Early" and then never finishes
        stall_lead: bool,
    }

    struct FixedSession {
        model: Model,
        reply: Option<&'static str>,
        stall: bool,
    }

    #[async_trait]
    impl LlmGateway for FixedGateway {
        async fn create_session_with_system_prompt(
            &self,
            model: &Model,
            system_prompt: &str,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            let is_member = ReviewerRole::ALL
                .iter()
                .any(|role| role.instructions() == system_prompt);
            Ok(Box::new(FixedSession {
                model: model.clone(),
                reply: self.reply,
                stall: self.stall_lead && !is_member,
            }))
        }
    }

    #[async_trait]
    impl LlmSession for FixedSession {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn send(&self, _content: &str) -> Result<String, GatewayError> {
            self.reply
                .map(str::to_string)
                .ok_or_else(|| GatewayError::ConnectionError("backend down".to_string()))
        }

        async fn send_streaming(&self, content: &str) -> Result<StreamHandle, GatewayError> {
            let (tx, rx) = mpsc::channel(4);
            if self.stall {
                let _ = tx.send(StreamEvent::Delta("Early".to_string())).await;
                tokio::spawn(async move { tx.closed().await });
            } else {
                let _ = tx.send(StreamEvent::Completed(self.send(content).await?)).await;
            }
            Ok(StreamHandle::new(rx))
        }
    }

    fn state(reply: Option<&'static str>, image_path: &std::path::Path) -> AppState<FixedGateway> {
        let gateway = FixedGateway {
            reply,
            stall_lead: false,
        };
        let team = RunTeamUseCase::new(Arc::new(gateway), TeamSpec::default());
        AppState::new(AskTeamUseCase::new(team), image_path)
    }

    fn query(input: &str) -> Result<Query<TeamQuery>, QueryRejection> {
        Ok(Query(TeamQuery {
            input: Some(input.to_string()),
        }))
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_is_html() {
        let Html(page) = handle_index().await;
        assert!(page.contains("<html"));
    }

    #[tokio::test]
    async fn test_team_mints_session_header() {
        let dir = tempfile::tempdir().unwrap();
        let response = handle_team(
            State(state(Some("Looks fine."), &dir.path().join("i.png"))),
            HeaderMap::new(),
            query("Check this loop"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let session = response.headers().get(SESSION_HEADER).unwrap();
        assert!(!session.is_empty());
        let body = body_text(response).await;
        assert!(body.starts_with("# Code Review Report"));
        assert!(body.contains("## Code Optimization Agent"));
    }

    #[tokio::test]
    async fn test_team_echoes_supplied_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("my-session"));

        let response = handle_team(
            State(state(Some("ok"), &dir.path().join("i.png"))),
            headers,
            query("hi"),
        )
        .await;

        assert_eq!(response.headers()[SESSION_HEADER], "my-session");
    }

    #[tokio::test]
    async fn test_undecodable_session_header_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_bytes(b"caf\xe9").unwrap());

        let response = handle_team(
            State(state(Some("ok"), &dir.path().join("i.png"))),
            headers,
            query("hi"),
        )
        .await;

        let session = response.headers()[SESSION_HEADER].to_str().unwrap();
        assert!(!session.is_empty());
        assert!(!session.starts_with("caf"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_team_body_streams_before_run_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = FixedGateway {
            reply: Some("ok"),
            stall_lead: true,
        };
        let team = RunTeamUseCase::new(Arc::new(gateway), TeamSpec::default());
        let app = AppState::new(AskTeamUseCase::new(team), dir.path().join("i.png"));

        let response = handle_team(State(app), HeaderMap::new(), query("hi")).await;
        let mut body = response.into_body();

        let first = body.frame().await.unwrap().unwrap().into_data().unwrap();
        assert!(first.starts_with(b"# Code Review Report"));
        let second = body.frame().await.unwrap().unwrap().into_data().unwrap();
        assert_eq!(&second[..], b"Early");

        // The lead has not finished, so the body is still open.
        let rest = tokio::time::timeout(Duration::from_secs(60), body.frame()).await;
        assert!(rest.is_err());
    }

    #[tokio::test]
    async fn test_two_anonymous_calls_get_distinct_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let app = state(Some("ok"), &dir.path().join("i.png"));

        let first = handle_team(State(app.clone()), HeaderMap::new(), query("a")).await;
        let second = handle_team(State(app), HeaderMap::new(), query("b")).await;

        assert_ne!(
            first.headers()[SESSION_HEADER],
            second.headers()[SESSION_HEADER]
        );
    }

    #[tokio::test]
    async fn test_failure_is_apologetic_stream_with_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("keep-me"));

        let response = handle_team(
            State(state(None, &dir.path().join("i.png"))),
            headers,
            query("anything"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[SESSION_HEADER], "keep-me");
        let body = body_text(response).await;
        assert!(body.starts_with("I'm sorry, but something went wrong. ("));
    }

    #[tokio::test]
    async fn test_image_absent_is_empty_ok() {
        let dir = tempfile::tempdir().unwrap();
        let response = handle_image(State(state(Some("ok"), &dir.path().join("image.png")))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_image_served_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.png");
        std::fs::write(&path, b"\x89PNG\r\n").unwrap();
        let app = state(Some("ok"), &path);

        let first = handle_image(State(app.clone())).await;
        assert!(body_text(first).await.starts_with("data:image/png;base64,"));
        assert!(!path.exists());

        let second = handle_image(State(app)).await;
        assert_eq!(body_text(second).await, "");
    }
}
