// weekshare/src/server.rs
//
// HTTP surface: Slack front door, worker endpoint, health probe.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use weekshare_core::application::{CommandDispatcher, ShareProcessor};
use weekshare_core::domain::command::{Acknowledgment, HandOff};
use weekshare_core::infrastructure::adapters::TOKEN_HEADER;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<CommandDispatcher>,
    pub processor: Arc<ShareProcessor>,
    /// When set, /tasks/share requires it in `x-weekshare-token`.
    pub worker_token: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/slack/commands", post(slack_command))
        .route("/tasks/share", post(share_task))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Slack only shows 200 answers, errors are carried in the text.
/// Raw bytes so a body that is not UTF-8 still gets a usage reply.
async fn slack_command(State(state): State<AppState>, body: Bytes) -> Json<Acknowledgment> {
    let body = String::from_utf8_lossy(&body);
    Json(state.dispatcher.handle(&body).await)
}

/// Accepts the hand-off and processes it after answering.
async fn share_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(handoff): Json<HandOff>,
) -> StatusCode {
    if let Some(expected) = &state.worker_token {
        let provided = headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            warn!("🔒 Hand-off rejected: bad or missing token");
            return StatusCode::UNAUTHORIZED;
        }
    }

    let processor = state.processor.clone();
    tokio::spawn(async move {
        let outcome = processor.process(handoff).await;
        info!(?outcome, "Hand-off processed");
    });
    StatusCode::ACCEPTED
}

async fn healthz() -> &'static str {
    "ok"
}
