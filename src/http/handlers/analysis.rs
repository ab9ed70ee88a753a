use crate::domain::analysis::{AnalysisError, AnalysisResponse};
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn trigger_analysis(State(state): State<AppState>) -> impl IntoResponse {
    let outcome = state.analysis_service.analyze().await;
    if let Err(e) = &outcome {
        tracing::info!(error = %e, "analysis returned an error");
    }
    (axum::http::StatusCode::OK, Json(AnalysisResponse::from(outcome))).into_response()
}

pub async fn get_digest(State(state): State<AppState>) -> impl IntoResponse {
    match state.analysis_service.digest() {
        Some(digest) => (axum::http::StatusCode::OK, digest).into_response(),
        None => (
            axum::http::StatusCode::NOT_FOUND,
            Json(AnalysisResponse::from(Err(AnalysisError::EmptySession))),
        )
            .into_response(),
    }
}
