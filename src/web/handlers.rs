use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use tracing::error;

use super::AppState;
use crate::components::chat::ChatService;
use crate::models::api::MESSAGE_REQUIRED;
use crate::models::{ApiResponse, ChatReply, ErrorBody, MessageRequest, ProcessedMessage};

/// Error text of failed process-message requests
pub const PROCESS_FAILED: &str = "Failed to process message";

/// Handler for the chat UI page
pub async fn index_handler() -> impl IntoResponse {
    Html(include_str!("../../assets/index.html"))
}

/// Handler for the health check
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Handler for chat messages; always answers 200 with a reply
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<ChatReply> {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            error!("Error reading chat body: {}", e);
            return Json(ChatService::failure_reply());
        }
    };

    match serde_json::from_slice::<MessageRequest>(&body) {
        Ok(request) => Json(state.chat.reply(&request.message).await),
        Err(e) => {
            error!("Error reading chat request: {}", e);
            Json(ChatService::failure_reply())
        }
    }
}

/// Handler for free-text and structured calendar requests; always answers 200
pub async fn calendar_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<ApiResponse> {
    match body {
        Ok(body) => Json(state.calendar.handle_body(&body)),
        Err(e) => {
            error!("Error reading calendar body: {}", e);
            Json(ApiResponse::error(MESSAGE_REQUIRED))
        }
    }
}

/// Handler for event extraction from chat text
pub async fn process_message_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ProcessedMessage>, (StatusCode, Json<ErrorBody>)> {
    let request = body
        .map_err(|e| e.to_string())
        .and_then(|body| {
            serde_json::from_slice::<MessageRequest>(&body).map_err(|e| e.to_string())
        })
        .map_err(|e| {
            error!("Error processing message: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: PROCESS_FAILED.to_string(),
                }),
            )
        })?;

    Ok(Json(state.calendar.process_message(&request.message)))
}
