//! HTTP service for interactive reviews
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | Landing page |
//! | `GET /team?input=` | Streamed report; `X-Session-ID` always set |
//! | `GET /image` | One-shot `data:image/png;base64,` URI, or an empty body |

mod handlers;
mod image;

pub use handlers::SESSION_HEADER;
pub use image::take_image;

use axum::Router;
use axum::routing::get;
use crew_application::{AskTeamUseCase, LlmGateway};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared by every request; cloning is cheap
pub struct AppState<G: LlmGateway + 'static> {
    ask: AskTeamUseCase<G>,
    image_path: Arc<PathBuf>,
}

impl<G: LlmGateway + 'static> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            ask: self.ask.clone(),
            image_path: Arc::clone(&self.image_path),
        }
    }
}

impl<G: LlmGateway + 'static> AppState<G> {
    pub fn new(ask: AskTeamUseCase<G>, image_path: impl Into<PathBuf>) -> Self {
        Self {
            ask,
            image_path: Arc::new(image_path.into()),
        }
    }
}

pub fn router<G: LlmGateway + 'static>(state: AppState<G>) -> Router {
    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/team", get(handlers::handle_team::<G>))
        .route("/image", get(handlers::handle_image::<G>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve until `shutdown` is cancelled; in-flight streams are allowed to finish.
pub async fn serve<G: LlmGateway + 'static>(
    state: AppState<G>,
    addr: &str,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
}
