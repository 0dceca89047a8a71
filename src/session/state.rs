use crate::models::Event;
use chrono::NaiveDate;

/// Events known to one client session
#[derive(Debug, Clone, Default)]
pub struct CalendarState {
    events: Vec<Event>,
}

impl CalendarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event; an event with the same id is replaced
    pub fn add(&mut self, event: Event) {
        match self.events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    /// Remove an event by id. Unknown ids leave the list untouched.
    pub fn remove(&mut self, id: &str) -> Option<Event> {
        let index = self.events.iter().position(|event| event.id == id)?;
        Some(self.events.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events touching the given day, earliest first
    pub fn on_day(&self, date: NaiveDate) -> Vec<&Event> {
        let mut events = self
            .events
            .iter()
            .filter(|event| event.occurs_on(date))
            .collect::<Vec<_>>();
        events.sort_by_key(|event| event.start);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn event(id: &str, day: u32, hour: u32) -> Event {
        let utc = FixedOffset::east_opt(0).unwrap();
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            start: utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap(),
            end: utc.with_ymd_and_hms(2024, 5, day, hour + 1, 0, 0).unwrap(),
            description: None,
        }
    }

    #[test]
    fn test_add_and_remove() {
        let mut state = CalendarState::new();
        state.add(event("a", 8, 9));
        state.add(event("b", 8, 11));
        assert_eq!(state.len(), 2);

        let removed = state.remove("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(state.len(), 1);
        assert!(state.get("a").is_none());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut state = CalendarState::new();
        state.add(event("a", 8, 9));
        state.add(event("b", 9, 9));
        let before = state.events().to_vec();

        assert!(state.remove("missing").is_none());
        assert_eq!(state.events(), before.as_slice());
    }

    #[test]
    fn test_add_same_id_replaces() {
        let mut state = CalendarState::new();
        state.add(event("a", 8, 9));
        let mut moved = event("a", 8, 15);
        moved.title = "Moved".to_string();
        state.add(moved);

        assert_eq!(state.len(), 1);
        assert_eq!(state.get("a").unwrap().title, "Moved");
    }

    #[test]
    fn test_on_day_sorted() {
        let mut state = CalendarState::new();
        state.add(event("late", 8, 16));
        state.add(event("other-day", 9, 8));
        state.add(event("early", 8, 7));

        let ids = state
            .on_day(NaiveDate::from_ymd_opt(2024, 5, 8).unwrap())
            .into_iter()
            .map(|event| event.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["early", "late"]);
    }
}
