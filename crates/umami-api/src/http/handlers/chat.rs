//! SSE streaming chat endpoint.
//!
//! POST /api/chat
//!
//! Validates the question, resolves the restaurant, then streams the answer:
//! one `{"data": "..."}` event per fragment followed by exactly one terminal
//! event, `[DONE]` or an event named `error`.

use std::convert::Infallible;
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::{Stream, StreamExt};
use serde_json::json;
use tokio_stream::wrappers::ReceiverStream;

use umami_core::answer::AnswerInput;
use umami_core::answer::relay::AnswerFrame;
use umami_core::restaurant::RestaurantRepository;
use umami_types::chat::{ChatRequest, DONE_SENTINEL, ERROR_EVENT};
use umami_types::locale::Locale;

use crate::http::error::{AppError, INTERNAL_MESSAGE};
use crate::state::AppState;

pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

fn to_event(frame: AnswerFrame) -> Event {
    match frame {
        AnswerFrame::Fragment(text) => Event::default().data(json!({ "data": text }).to_string()),
        AnswerFrame::Done => Event::default().data(DONE_SENTINEL),
        AnswerFrame::Failed => Event::default()
            .event(ERROR_EVENT)
            .data(json!({ "error": INTERNAL_MESSAGE }).to_string()),
    }
}

/// Validate the request and resolve everything the answer needs.
async fn prepare(state: &AppState, body: ChatRequest) -> Result<AnswerInput, AppError> {
    let question = body.question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("Question is required".to_string()));
    }

    let record = match body.id.as_deref() {
        Some(id) => Some(
            state
                .restaurants
                .find_by_id(id)
                .await?
                .ok_or_else(AppError::restaurant_not_found)?,
        ),
        None => None,
    };

    let restaurant_name = record
        .map(|r| r.name)
        .or(body.restaurant_name.filter(|name| !name.trim().is_empty()))
        .unwrap_or_else(|| state.config.assistant.default_restaurant_name.clone());

    Ok(AnswerInput {
        question: question.to_string(),
        history: body.history,
        restaurant_id: body.id,
        restaurant_name,
        locale: Locale::from_tag(body.language.as_deref().unwrap_or_default()),
    })
}

/// POST /api/chat
pub async fn stream_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let input = prepare(&state, body).await?;

    tracing::info!(
        restaurant_id = input.restaurant_id.as_deref().unwrap_or(""),
        locale = %input.locale,
        history_len = input.history.len(),
        "Chat request accepted"
    );

    let frames = state.answers.answer_detached(&input).await?;
    let events = ReceiverStream::new(frames).map(|frame| Ok(to_event(frame)));

    Ok(Sse::new(events).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL)))
}
