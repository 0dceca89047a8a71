use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of a session's chat history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Some(timestamp),
        }
    }

    pub fn assistant(text: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: Some(timestamp),
        }
    }
}
