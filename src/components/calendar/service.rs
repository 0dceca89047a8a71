use crate::components::parser::{extract_events, parse_command};
use crate::error::invalid_request;
use crate::models::api::MESSAGE_REQUIRED;
use crate::models::{
    Action, ApiResponse, CalendarCommandRequest, CalendarRequest, ProcessedMessage, WireEvent,
};
use crate::utils::{Clock, IdGenerator};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stateless handler behind the calendar and process-message endpoints.
///
/// Events are never stored here; every request is answered from its own
/// content and the injected clock.
#[derive(Clone)]
pub struct CalendarService {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl fmt::Debug for CalendarService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarService")
            .field("now", &self.clock.now())
            .finish()
    }
}

impl CalendarService {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Answer a raw request body. Bodies that are not JSON objects are rejected
    /// with the fixed "message is required" error.
    pub fn handle_body(&self, body: &[u8]) -> ApiResponse {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => self.handle_value(&value),
            Err(e) => {
                warn!("Calendar request body is not JSON: {}", e);
                ApiResponse::error(MESSAGE_REQUIRED)
            }
        }
    }

    /// Answer a decoded JSON body
    pub fn handle_value(&self, value: &Value) -> ApiResponse {
        match CalendarRequest::from_value(value) {
            Ok(request) => self.handle(request),
            Err(e) => {
                warn!("Rejected calendar request: {}", e);
                ApiResponse::error(e.to_string())
            }
        }
    }

    /// Answer a calendar request
    pub fn handle(&self, request: CalendarRequest) -> ApiResponse {
        match request {
            CalendarRequest::Message(message) => self.handle_message(&message),
            CalendarRequest::Command(command) => self.handle_command(command),
        }
    }

    /// Parse free text and give any parsed event a fresh id
    pub fn handle_message(&self, message: &str) -> ApiResponse {
        let parsed = parse_command(message, self.clock.now());
        debug!("Parsed '{}' as {}", message, parsed.action);

        let event = parsed
            .event
            .map(|draft| draft.into_event(self.ids.as_ref()).to_wire());

        if let Some(event) = &event {
            info!("Parsed {} event '{}' starting {}", parsed.action, event.title, event.start);
        }

        ApiResponse {
            action: parsed.action.into(),
            event,
            error: parsed.error,
        }
    }

    /// Validate a structured change and echo it back with an id assigned
    pub fn handle_command(&self, command: CalendarCommandRequest) -> ApiResponse {
        let CalendarCommandRequest { action, event } = command;

        if action == Action::Add && event.is_none() {
            return ApiResponse::error(invalid_request("event is required").to_string());
        }

        let event = match event.map(|wire| wire.into_event(self.ids.as_ref())) {
            Some(Ok(event)) => Some(event),
            Some(Err(e)) => {
                warn!("Rejected {} request: {}", action, e);
                return ApiResponse::error(e.to_string());
            }
            None => None,
        };

        if let Some(event) = &event {
            info!("Accepted {} for event '{}' ({})", action, event.title, event.id);
        }

        ApiResponse::new(action, event.as_ref().map(WireEvent::from))
    }

    /// Extract events from chat text for the process-message endpoint
    pub fn process_message(&self, message: &str) -> ProcessedMessage {
        let extraction = extract_events(message, self.clock.now());

        let events = extraction
            .events
            .into_iter()
            .map(|draft| draft.into_event(self.ids.as_ref()).to_wire())
            .collect::<Vec<_>>();

        info!("Extracted {} event(s) from message", events.len());

        ProcessedMessage {
            events,
            response: extraction.response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResponseAction;
    use crate::utils::{FixedClock, SequentialIds};
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;

    fn service() -> CalendarService {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 8, 10, 0, 0)
            .unwrap();
        CalendarService::new(
            Arc::new(FixedClock::new(now)),
            Arc::new(SequentialIds::new("event")),
        )
    }

    #[test]
    fn test_message_add_gets_id_and_wire_times() {
        let response = service().handle_value(&json!({"message": "Add standup at 9:15am"}));

        assert_eq!(response.action, ResponseAction::Add);
        assert!(response.error.is_none());
        let event = response.event.unwrap();
        assert_eq!(event.id.as_deref(), Some("event-1"));
        assert_eq!(event.title, "Add standup");
        assert_eq!(event.start, "2024-05-09T09:15:00.000Z");
        assert_eq!(event.end, "2024-05-09T10:15:00.000Z");
    }

    #[test]
    fn test_message_without_intent_reports_error() {
        let response = service().handle_value(&json!({"message": "good morning"}));
        assert_eq!(response.action, ResponseAction::Add);
        assert!(response.event.is_none());
        assert_eq!(response.error.as_deref(), Some("Could not understand command"));
    }

    #[test]
    fn test_malformed_bodies() {
        let service = service();
        let bodies: [&[u8]; 3] = [b"not json", b"[1, 2]", b"{\"text\": \"hi\"}"];
        for body in bodies {
            let response = service.handle_body(body);
            assert_eq!(response.action, ResponseAction::Error);
            assert_eq!(response.error.as_deref(), Some(MESSAGE_REQUIRED));
        }
    }

    #[test]
    fn test_structured_add_keeps_given_id() {
        let response = service().handle_value(&json!({
            "action": "add",
            "event": {
                "id": "slot-42",
                "title": "Focus time",
                "start": "2024-05-08T13:00:00+02:00",
                "end": "2024-05-08T15:00:00+02:00"
            }
        }));

        assert_eq!(response.action, ResponseAction::Add);
        let event = response.event.unwrap();
        assert_eq!(event.id.as_deref(), Some("slot-42"));
        assert_eq!(event.start, "2024-05-08T11:00:00.000Z");
    }

    #[test]
    fn test_structured_add_requires_event() {
        let response = service().handle_value(&json!({"action": "add"}));
        assert_eq!(response.action, ResponseAction::Error);
        assert_eq!(response.error.as_deref(), Some("Invalid request: event is required"));
    }

    #[test]
    fn test_structured_remove_with_bad_timestamp() {
        let response = service().handle_value(&json!({
            "action": "remove",
            "event": {"title": "Lunch", "start": "noon", "end": "later"}
        }));
        assert_eq!(response.action, ResponseAction::Error);
        assert!(response.error.unwrap().starts_with("Invalid event:"));
    }

    #[test]
    fn test_structured_view_without_event() {
        let response = service().handle_value(&json!({"action": "view"}));
        assert_eq!(response, ApiResponse::new(Action::View, None));
    }

    #[test]
    fn test_process_message_assigns_ids() {
        let processed = service().process_message("Dinner tomorrow at 7pm");
        assert_eq!(processed.events.len(), 1);
        assert_eq!(processed.events[0].id.as_deref(), Some("event-1"));
        assert_eq!(processed.events[0].start, "2024-05-09T19:00:00.000Z");
    }
}
