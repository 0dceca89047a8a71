//! Client side of the assistant: the session's event list, chat transcript
//! and calendar views.
//!
//! Chat messages, slot selection and event deletion all reach the server
//! through the same endpoint contract. Slot selection and deletion send the
//! structured `{action, event}` form of the calendar endpoint; chat sends free
//! text. The event list changes only after the server accepted a change.

pub mod client;
pub mod history;
pub mod state;
pub mod view;

pub use client::{AssistantApi, HttpAssistantApi, LocalAssistantApi};
pub use history::ChatHistory;
pub use state::CalendarState;
pub use view::{day_view, week_view, DayView, WeekView};

use crate::error::{AppResult, Error};
use crate::models::event::format_instant;
use crate::models::{Action, CalendarCommandRequest, ChatMessage, ChatReply, Event, WireEvent};
use crate::utils::{Clock, IdGenerator};
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;
use tracing::{error, warn};

/// One user's session. Taking `&mut self` for every action keeps a session
/// to one outstanding request at a time.
pub struct Session<A: AssistantApi> {
    api: A,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    state: CalendarState,
    history: ChatHistory,
}

impl<A: AssistantApi> Session<A> {
    pub fn new(api: A, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            api,
            clock,
            ids,
            state: CalendarState::new(),
            history: ChatHistory::default(),
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Send a chat message and record the reply.
    ///
    /// Blank messages are ignored and return `None`. Events returned by the
    /// assistant are added to the session.
    pub async fn send_message(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.history.push(ChatMessage::user(text, self.clock.now()));

        let reply = match self.api.chat(text).await {
            Ok(ChatReply { response, events }) => {
                for wire in events.unwrap_or_default() {
                    match self.adopt(wire) {
                        Ok(event) => self.state.add(event),
                        Err(e) => warn!("Ignoring event from chat reply: {}", e),
                    }
                }
                response
            }
            Err(e) => {
                error!("Error sending message: {}", e);
                t!("chat.failed").to_string()
            }
        };

        Some(self.say(reply))
    }

    /// Create an event for a selected time slot.
    ///
    /// An empty title cancels the selection and returns `None`.
    pub async fn select_slot(
        &mut self,
        title: &str,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Option<String> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let request = CalendarCommandRequest {
            action: Action::Add,
            event: Some(WireEvent {
                id: None,
                title: title.to_string(),
                start: format_instant(&start),
                end: format_instant(&end),
                description: None,
            }),
        };

        let outcome = self.submit(&request).await.and_then(|event| {
            event
                .map(|wire| self.adopt(wire))
                .transpose()
        });

        let reply = match outcome {
            Ok(Some(event)) => {
                let reply = t!("session.event_added", title = &event.title).to_string();
                self.state.add(event);
                reply
            }
            Ok(None) => t!("session.event_added", title = title).to_string(),
            Err(e) => {
                error!("Error creating event: {}", e);
                t!("session.create_failed", error = e.to_string()).to_string()
            }
        };

        Some(self.say(reply))
    }

    /// Delete an event of this session.
    ///
    /// Unknown ids are a no-op: nothing is sent and `None` is returned.
    pub async fn delete_event(&mut self, id: &str) -> Option<String> {
        let event = self.state.get(id)?.clone();

        let request = CalendarCommandRequest {
            action: Action::Remove,
            event: Some(event.to_wire()),
        };

        let reply = match self.submit(&request).await {
            Ok(_) => {
                self.state.remove(id);
                t!("session.event_deleted", title = &event.title).to_string()
            }
            Err(e) => {
                error!("Error deleting event: {}", e);
                t!("session.delete_failed", error = e.to_string()).to_string()
            }
        };

        Some(self.say(reply))
    }

    /// Send a structured change; an `error` in the response counts as a failure
    async fn submit(&self, request: &CalendarCommandRequest) -> AppResult<Option<WireEvent>> {
        let response = self.api.calendar(request).await?;
        match response.error {
            Some(error) => Err(Error::Rejected(error)),
            None => Ok(response.event),
        }
    }

    /// Convert a wire event into the session's local offset
    fn adopt(&self, wire: WireEvent) -> AppResult<Event> {
        let mut event = wire.into_event(self.ids.as_ref())?;
        let offset = self.clock.now().timezone();
        event.start = event.start.with_timezone(&offset);
        event.end = event.end.with_timezone(&offset);
        Ok(event)
    }

    fn say(&mut self, text: String) -> String {
        self.history
            .push(ChatMessage::assistant(text.clone(), self.clock.now()));
        text
    }
}
