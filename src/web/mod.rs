//! HTTP surface: the UI page and the chat, calendar and process-message endpoints.

mod handlers;

use crate::components::calendar::{
    CalendarBackend, CalendarService, HttpCalendarBackend, LocalCalendarBackend,
};
use crate::components::chat::ChatService;
use crate::config::Config;
use crate::error::AppResult;
use crate::utils::{Clock, IdGenerator};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use handlers::{
    calendar_handler, chat_handler, health_handler, index_handler, process_message_handler,
    PROCESS_FAILED,
};

/// Largest request body the endpoints accept
const BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    /// Parser-backed calendar endpoint logic
    pub calendar: Arc<CalendarService>,
    /// Chat dispatch
    pub chat: Arc<ChatService>,
}

impl AppState {
    /// State whose chat forwards to the in-process calendar service
    pub fn local(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        let calendar = Arc::new(CalendarService::new(clock, ids));
        let backend: Arc<dyn CalendarBackend> =
            Arc::new(LocalCalendarBackend::new(Arc::clone(&calendar)));

        Self {
            calendar,
            chat: Arc::new(ChatService::new(backend)),
        }
    }

    /// State built from configuration; chat forwards over HTTP when a forward URL is set
    pub fn from_config(
        config: &Config,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> AppResult<Self> {
        let Some(url) = &config.calendar_forward_url else {
            info!("Chat dispatches to the in-process calendar service");
            return Ok(Self::local(clock, ids));
        };

        let backend = HttpCalendarBackend::new(url)?;
        info!("Chat forwards calendar commands to {}", backend.endpoint());

        Ok(Self {
            calendar: Arc::new(CalendarService::new(clock, ids)),
            chat: Arc::new(ChatService::new(Arc::new(backend))),
        })
    }
}

/// Build the router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/calendar", post(calendar_handler))
        .route("/api/process-message", post(process_message_handler))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
