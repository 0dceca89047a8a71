use super::grammar::{Cues, ScheduleDefaults, UnsetTime};
use crate::models::EventDraft;
use chrono::{DateTime, FixedOffset};

/// Free-text events start today, at the current time unless one is given
const EXTRACTION_DEFAULTS: ScheduleDefaults = ScheduleDefaults {
    day_offset: 0,
    unset_time: UnsetTime::CurrentTime,
};

/// Events found in a message and the reply describing them
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub events: Vec<EventDraft>,
    pub response: String,
}

/// Extract an event from chat text.
///
/// Nothing is extracted unless the message contains a time or a date cue.
pub fn extract_events(message: &str, now: DateTime<FixedOffset>) -> Extraction {
    let cues = Cues::scan(message);

    if !cues.has_schedule() {
        return Extraction {
            events: Vec::new(),
            response: t!("extract.clarify").to_string(),
        };
    }

    let (start, end) = cues.schedule(&now, EXTRACTION_DEFAULTS);

    let mut when = String::new();
    if let Some(date) = cues.date.and_then(|cue| cue.describe()) {
        when.push(' ');
        when.push_str(&date);
    }
    if let Some(time) = &cues.time {
        when.push_str(" at ");
        when.push_str(&time.text);
    }

    let response = t!("extract.added", title = &cues.title, when = &when).to_string();

    Extraction {
        events: vec![EventDraft {
            title: cues.title,
            start,
            end,
            description: None,
        }],
        response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const CLARIFICATION: &str = "I couldn't find any event details in your message. Could you please specify a time and date for the event?";

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    /// Monday, 2024-05-06 10:17:45
    fn monday() -> DateTime<FixedOffset> {
        utc().with_ymd_and_hms(2024, 5, 6, 10, 17, 45).unwrap()
    }

    #[test]
    fn test_no_cue_asks_for_details() {
        let extraction = extract_events("Remind me about the report", monday());
        assert!(extraction.events.is_empty());
        assert_eq!(extraction.response, CLARIFICATION);
    }

    #[test]
    fn test_time_only_lands_today() {
        let extraction = extract_events("Lunch with Sam at 1:30pm", monday());
        assert_eq!(extraction.events.len(), 1);

        let event = &extraction.events[0];
        assert_eq!(event.title, "Lunch with Sam");
        assert_eq!(event.start, utc().with_ymd_and_hms(2024, 5, 6, 13, 30, 0).unwrap());
        assert_eq!(event.end - event.start, Duration::hours(1));
        assert_eq!(
            extraction.response,
            "I've added \"Lunch with Sam\" to your calendar at 1:30pm."
        );
    }

    #[test]
    fn test_date_only_keeps_current_time() {
        let extraction = extract_events("Gym tomorrow for 90 minutes", monday());
        let event = &extraction.events[0];
        assert_eq!(event.start, monday() + Duration::days(1));
        assert_eq!(event.end - event.start, Duration::minutes(90));
        assert_eq!(
            extraction.response,
            "I've added \"Gym\" to your calendar tomorrow."
        );
    }

    #[test]
    fn test_next_weekday_on_same_weekday_is_today() {
        let extraction = extract_events("Retro next monday at 3pm", monday());
        let event = &extraction.events[0];
        assert_eq!(event.start, utc().with_ymd_and_hms(2024, 5, 6, 15, 0, 0).unwrap());
        assert_eq!(
            extraction.response,
            "I've added \"Retro\" to your calendar next monday at 3pm."
        );
    }

    #[test]
    fn test_next_weekday_later_in_week() {
        let extraction = extract_events("Retro next Thursday from 9am lasting 2 hours", monday());
        let event = &extraction.events[0];
        assert_eq!(event.start, utc().with_ymd_and_hms(2024, 5, 9, 9, 0, 0).unwrap());
        assert_eq!(event.end, utc().with_ymd_and_hms(2024, 5, 9, 11, 0, 0).unwrap());
    }

    #[test]
    fn test_cue_only_message_gets_placeholder_title() {
        let extraction = extract_events("today at 5pm", monday());
        assert_eq!(extraction.events[0].title, "New Event");
    }
}
