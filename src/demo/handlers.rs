use super::runner::run_demo;
use crate::client::backend::SearchBackend;
use crate::config::types::DecodePolicy;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::any;
use axum::Router;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn SearchBackend>,
    pub decode_policy: DecodePolicy,
}

impl AppState {
    pub fn new(backend: Arc<dyn SearchBackend>, decode_policy: DecodePolicy) -> Self {
        Self {
            backend,
            decode_policy,
        }
    }
}

/// Every method on every path runs the demo.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handle_demo))
        .fallback(handle_demo)
        .with_state(state)
}

/// Runs the demo; the request itself is ignored.
///
/// Success is `200 text/plain` with the transcript. Failures are logged and answered
/// with the error's status code and message; the server keeps serving.
pub async fn handle_demo(State(state): State<AppState>) -> Result<String, (StatusCode, String)> {
    match run_demo(state.backend.as_ref(), state.decode_policy).await {
        Ok(transcript) => Ok(transcript),
        Err(e) => {
            match e.upstream_status() {
                Some(status) => tracing::error!("Demo failed (engine status {}): {}", status, e),
                None => tracing::error!("Demo failed: {}", e),
            }
            Err((e.status_code(), format!("{}\n", e)))
        }
    }
}
