pub mod calendar;
pub mod chat;
pub mod parser;

pub use calendar::{CalendarBackend, CalendarService};
pub use chat::ChatService;
