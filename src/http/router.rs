use crate::http::handlers::{analysis, ops, session, stream};
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(ops::health))
        .route("/ops/liveness", get(ops::liveness))
        .route("/api/stream", get(stream::stream_signals))
        .route("/api/analyze", post(analysis::trigger_analysis))
        .route("/api/digest", get(analysis::get_digest))
        .route("/api/session", get(session::get_session))
        .with_state(state)
}
