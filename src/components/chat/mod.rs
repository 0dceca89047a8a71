//! Chat dispatch: forwards messages to the calendar endpoint and phrases the
//! outcome for the user.

use crate::components::calendar::CalendarBackend;
use crate::components::parser::DEFAULT_TITLE;
use crate::models::{ApiResponse, ChatReply, ResponseAction};
use std::sync::Arc;
use tracing::{error, info};

/// Turns chat messages into calendar changes and replies
#[derive(Clone)]
pub struct ChatService {
    backend: Arc<dyn CalendarBackend>,
}

impl ChatService {
    pub fn new(backend: Arc<dyn CalendarBackend>) -> Self {
        Self { backend }
    }

    /// Reply to a chat message. Failures are folded into the reply text.
    pub async fn reply(&self, message: &str) -> ChatReply {
        let message = message.trim();
        if message.is_empty() {
            return ChatReply::text(t!("chat.help"));
        }

        match self.backend.submit(message).await {
            Ok(response) => format_reply(response),
            Err(e) => {
                error!("Error processing chat message: {}", e);
                ChatReply::text(t!("chat.failed"))
            }
        }
    }

    /// Reply used when the chat request itself could not be read
    pub fn failure_reply() -> ChatReply {
        ChatReply::text(t!("chat.failed"))
    }
}

/// Phrase a calendar endpoint response for the user
pub fn format_reply(response: ApiResponse) -> ChatReply {
    if let Some(error) = response.error {
        return ChatReply::text(t!("chat.not_processed", error = &error));
    }

    let title = response.event.as_ref().map(|event| event.title.clone());

    let text = match (response.action, title) {
        (ResponseAction::Add, Some(title)) => t!("chat.added", title = &title),
        (ResponseAction::Add, None) => t!("chat.added", title = DEFAULT_TITLE),
        (ResponseAction::Remove, _) => t!("chat.removed"),
        (ResponseAction::Update, Some(title)) => t!("chat.updated", title = &title),
        (ResponseAction::Update, None) => t!("chat.updated_untitled"),
        (ResponseAction::View, _) => t!("chat.view"),
        (ResponseAction::Error, _) => t!("chat.failed"),
    };

    let events = match response.action {
        ResponseAction::Add => response.event.map(|event| vec![event]),
        _ => None,
    };

    info!("Chat reply for {:?}: {}", response.action, text);

    ChatReply {
        response: text.to_string(),
        events,
    }
}
