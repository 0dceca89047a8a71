use super::event::{EventDraft, WireEvent};
use crate::error::{invalid_request, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Error text for calendar requests that carry neither a message nor an action
pub const MESSAGE_REQUIRED: &str = "Invalid request: message is required";

/// Error text for commands whose intent could not be classified
pub const UNRECOGNIZED_COMMAND: &str = "Could not understand command";

/// Intent classified from a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Add,
    Remove,
    Update,
    View,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Add => "add",
            Action::Remove => "remove",
            Action::Update => "update",
            Action::View => "view",
        };
        f.write_str(name)
    }
}

/// Action field of a calendar endpoint response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseAction {
    Add,
    Remove,
    Update,
    View,
    Error,
}

impl From<Action> for ResponseAction {
    fn from(action: Action) -> Self {
        match action {
            Action::Add => ResponseAction::Add,
            Action::Remove => ResponseAction::Remove,
            Action::Update => ResponseAction::Update,
            Action::View => ResponseAction::View,
        }
    }
}

/// Result of parsing one message
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    pub action: Action,
    pub event: Option<EventDraft>,
    pub error: Option<String>,
}

impl ParsedCommand {
    pub fn for_action(action: Action) -> Self {
        Self {
            action,
            event: None,
            error: None,
        }
    }

    pub fn unrecognized() -> Self {
        Self {
            action: Action::Add,
            event: None,
            error: Some(UNRECOGNIZED_COMMAND.to_string()),
        }
    }
}

/// Body of calendar endpoint responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub action: ResponseAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<WireEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn new(action: impl Into<ResponseAction>, event: Option<WireEvent>) -> Self {
        Self {
            action: action.into(),
            event,
            error: None,
        }
    }

    /// Rejected request; no side effects took place
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            action: ResponseAction::Error,
            event: None,
            error: Some(message.into()),
        }
    }
}

/// `{message}` body shared by the chat and process-message endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// Structured `{action, event}` body sent by slot selection and event deletion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCommandRequest {
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<WireEvent>,
}

/// Body accepted by the calendar endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarRequest {
    /// Free text to run through the command parser
    Message(String),
    /// Already structured change from the calendar view
    Command(CalendarCommandRequest),
}

impl CalendarRequest {
    /// Interpret a decoded JSON body.
    ///
    /// An `action` key selects the structured form, otherwise a string
    /// `message` is required.
    pub fn from_value(value: &Value) -> AppResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| invalid_request("message is required"))?;

        if let Some(action) = object.get("action") {
            let action: Action = serde_json::from_value(action.clone())
                .map_err(|_| invalid_request(&format!("unknown action {}", action)))?;

            let event = match object.get("event") {
                None | Some(Value::Null) => None,
                Some(event) => Some(
                    serde_json::from_value::<WireEvent>(event.clone())
                        .map_err(|e| invalid_request(&format!("malformed event: {}", e)))?,
                ),
            };

            return Ok(CalendarRequest::Command(CalendarCommandRequest { action, event }));
        }

        match object.get("message").and_then(Value::as_str) {
            Some(message) => Ok(CalendarRequest::Message(message.to_string())),
            None => Err(invalid_request("message is required")),
        }
    }
}

/// Body of chat endpoint responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<WireEvent>>,
}

impl ChatReply {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            events: None,
        }
    }
}

/// Body of process-message endpoint responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedMessage {
    pub events: Vec<WireEvent>,
    pub response: String,
}

/// Body of HTTP error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
