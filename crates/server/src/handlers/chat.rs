//! # Chat Handlers

use super::{AppError, AppState};
use crate::types::{DemoChatRequest, DemoChatResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use faqrelay::{constants::MESSAGE_REQUIRED, ChatRequest, ChatResponse, FaqRelayError};
use serde_json::Value;

/// `POST /api/chat`: answers a message for a client.
///
/// The message is checked before the rest of the body is parsed: a missing,
/// non-JSON or blank-message body is always "Message is required", whatever
/// the other fields hold.
pub async fn chat_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let payload = payload.map(|Json(value)| value).unwrap_or(Value::Null);
    let has_message = payload
        .get("message")
        .and_then(Value::as_str)
        .is_some_and(|message| !message.trim().is_empty());
    if !has_message {
        return Err(FaqRelayError::Validation(MESSAGE_REQUIRED.to_string()).into());
    }

    let request: ChatRequest =
        serde_json::from_value(payload).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let response = app_state.chat_bot.handle(request).await?;
    Ok(Json(response))
}

/// `POST /chat`: the demo page's shortcut, always answering as the demo client.
pub async fn demo_chat_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<DemoChatRequest>, JsonRejection>,
) -> Result<Json<DemoChatResponse>, AppError> {
    // An unreadable body is treated like a missing message.
    let message = payload
        .map(|Json(payload)| payload.message)
        .unwrap_or_default();
    let request = ChatRequest {
        message,
        client_id: Some(app_state.config.demo_client_id.clone()),
        conversation_history: Vec::new(),
    };

    let response = app_state.chat_bot.handle(request).await?;
    Ok(Json(DemoChatResponse {
        answer: response.response,
    }))
}
