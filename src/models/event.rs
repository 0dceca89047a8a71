use crate::error::{invalid_event, AppResult};
use crate::utils::IdGenerator;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Calendar event with native instants
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub description: Option<String>,
}

/// Event fields produced by parsing, before an id is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub description: Option<String>,
}

/// Event as it travels over JSON, instants as ISO-8601 strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EventDraft {
    /// Attach a freshly generated id
    pub fn into_event(self, ids: &dyn IdGenerator) -> Event {
        Event {
            id: ids.next_id(),
            title: self.title,
            start: self.start,
            end: self.end,
            description: self.description,
        }
    }
}

impl Event {
    /// Length of the event; negative when `end` precedes `start`
    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    /// Whether any part of the event falls on the given day, in the event's own offset
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        let first = self.start.date_naive();
        let last = if self.end > self.start && self.end.time() == chrono::NaiveTime::MIN {
            // An event ending exactly at midnight does not spill into that day
            self.end.date_naive().pred_opt().unwrap_or(first)
        } else {
            self.end.date_naive()
        };
        first <= date && date <= last.max(first)
    }

    /// Convert to the wire form, normalizing instants to UTC
    pub fn to_wire(&self) -> WireEvent {
        WireEvent {
            id: Some(self.id.clone()),
            title: self.title.clone(),
            start: format_instant(&self.start),
            end: format_instant(&self.end),
            description: self.description.clone(),
        }
    }
}

impl WireEvent {
    /// Convert to an in-memory event, generating an id when none is present
    pub fn into_event(self, ids: &dyn IdGenerator) -> AppResult<Event> {
        let start = parse_instant(&self.start)?;
        let end = parse_instant(&self.end)?;
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => ids.next_id(),
        };

        Ok(Event {
            id,
            title: self.title,
            start,
            end,
            description: self.description,
        })
    }
}

impl From<&Event> for WireEvent {
    fn from(event: &Event) -> Self {
        event.to_wire()
    }
}

/// Format an instant as `YYYY-MM-DDTHH:MM:SS.sssZ`
pub fn format_instant(instant: &DateTime<FixedOffset>) -> String {
    instant
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO-8601 instant. Strings without an offset are read as UTC.
pub fn parse_instant(text: &str) -> AppResult<DateTime<FixedOffset>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    Err(invalid_event(&format!("'{}' is not an ISO-8601 timestamp", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::SequentialIds;
    use chrono::TimeZone;

    fn helsinki() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).unwrap()
    }

    fn sample_event() -> Event {
        Event {
            id: "event-7".to_string(),
            title: "Dentist".to_string(),
            start: helsinki().with_ymd_and_hms(2024, 5, 8, 14, 0, 0).unwrap(),
            end: helsinki().with_ymd_and_hms(2024, 5, 8, 15, 0, 0).unwrap(),
            description: Some("Bring the referral".to_string()),
        }
    }

    #[test]
    fn test_to_wire_normalizes_to_utc() {
        let wire = sample_event().to_wire();
        assert_eq!(wire.id.as_deref(), Some("event-7"));
        assert_eq!(wire.start, "2024-05-08T11:00:00.000Z");
        assert_eq!(wire.end, "2024-05-08T12:00:00.000Z");
    }

    #[test]
    fn test_wire_round_trip_keeps_fields_and_instants() {
        let event = sample_event();
        let ids = SequentialIds::new("unused");

        let back = event.to_wire().into_event(&ids).unwrap();

        assert_eq!(back.id, event.id);
        assert_eq!(back.title, event.title);
        assert_eq!(back.description, event.description);
        assert_eq!(back.start, event.start);
        assert_eq!(back.end, event.end);
        // The offset itself is normalized away
        assert_eq!(back.start.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_missing_id_is_generated() {
        let wire: WireEvent = serde_json::from_str(
            r#"{"title":"Standup","start":"2024-05-08T09:00:00.000Z","end":"2024-05-08T09:15:00.000Z"}"#,
        )
        .unwrap();
        let ids = SequentialIds::new("event");

        let event = wire.into_event(&ids).unwrap();
        assert_eq!(event.id, "event-1");
        assert_eq!(event.duration(), Duration::minutes(15));
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let wire = WireEvent {
            id: None,
            title: "Broken".to_string(),
            start: "next tuesday".to_string(),
            end: "2024-05-08T09:15:00Z".to_string(),
            description: None,
        };
        assert!(wire.into_event(&SequentialIds::new("event")).is_err());
    }

    #[test]
    fn test_offsetless_timestamps_read_as_utc() {
        let parsed = parse_instant("2024-05-08T09:30").unwrap();
        assert_eq!(format_instant(&parsed), "2024-05-08T09:30:00.000Z");
    }

    #[test]
    fn test_inverted_interval_is_accepted() {
        // start <= end is not enforced
        let mut event = sample_event();
        std::mem::swap(&mut event.start, &mut event.end);
        assert!(event.duration() < Duration::zero());
        assert!(event.to_wire().into_event(&SequentialIds::new("e")).is_ok());
    }

    #[test]
    fn test_occurs_on() {
        let event = sample_event();
        assert!(event.occurs_on(NaiveDate::from_ymd_opt(2024, 5, 8).unwrap()));
        assert!(!event.occurs_on(NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()));

        let overnight = Event {
            start: helsinki().with_ymd_and_hms(2024, 5, 8, 22, 0, 0).unwrap(),
            end: helsinki().with_ymd_and_hms(2024, 5, 9, 0, 0, 0).unwrap(),
            ..sample_event()
        };
        assert!(!overnight.occurs_on(NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()));
    }

    #[test]
    fn test_serialized_wire_omits_absent_fields() {
        let wire = WireEvent {
            id: None,
            title: "Lunch".to_string(),
            start: "2024-05-08T11:00:00.000Z".to_string(),
            end: "2024-05-08T12:00:00.000Z".to_string(),
            description: None,
        };
        let json = serde_json::to_value(&wire).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("description").is_none());
    }
}
