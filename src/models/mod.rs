pub mod api;
pub mod chat;
pub mod event;

pub use api::{
    Action, ApiResponse, CalendarCommandRequest, CalendarRequest, ChatReply, ErrorBody,
    MessageRequest, ParsedCommand, ProcessedMessage, ResponseAction,
};
pub use chat::{ChatMessage, Role};
pub use event::{Event, EventDraft, WireEvent};
