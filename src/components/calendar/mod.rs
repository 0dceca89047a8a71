pub mod backend;
pub mod service;

pub use backend::{CalendarBackend, HttpCalendarBackend, LocalCalendarBackend};
pub use service::CalendarService;
