use crate::service::stream_service::StreamEvent;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::sse::{Event, Sse};
use axum::response::IntoResponse;
use futures::StreamExt;
use serde::Deserialize;

pub const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub count: Option<usize>,
}

pub async fn stream_signals(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> impl IntoResponse {
    let count = state.config.stream_count(query.count);
    let events = state.stream_service.start(count).map(to_sse_event);
    Sse::new(events)
}

fn to_sse_event(event: StreamEvent) -> Result<Event, axum::Error> {
    match event {
        StreamEvent::Signal(signal) => Event::default().json_data(signal),
        StreamEvent::Done => Ok(Event::default().data(DONE_MARKER)),
    }
}
