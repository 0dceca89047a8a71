use super::state::CalendarState;
use crate::models::Event;
use crate::utils::time::week_range;
use chrono::{Duration, NaiveDate};
use std::fmt;

/// Events of a single day, earliest first
#[derive(Debug, Clone)]
pub struct DayView<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a Event>,
}

/// Seven days, Sunday first
#[derive(Debug, Clone)]
pub struct WeekView<'a> {
    pub days: Vec<DayView<'a>>,
}

/// Build the view of one day
pub fn day_view(state: &CalendarState, date: NaiveDate) -> DayView<'_> {
    DayView {
        date,
        events: state.on_day(date),
    }
}

/// Build the view of the week containing `date`
pub fn week_view(state: &CalendarState, date: NaiveDate) -> WeekView<'_> {
    let (sunday, _) = week_range(date);
    let days = (0..7)
        .map(|offset| day_view(state, sunday + Duration::days(offset)))
        .collect();

    WeekView { days }
}

impl WeekView<'_> {
    /// Number of event placements across the week; multi-day events count once per day
    pub fn placements(&self) -> usize {
        self.days.iter().map(|day| day.events.len()).sum()
    }
}

impl fmt::Display for DayView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date.format("%a %Y-%m-%d"))?;

        if self.events.is_empty() {
            return writeln!(f, "  (no events)");
        }

        for event in &self.events {
            write!(
                f,
                "  {}-{}  {}",
                event.start.format("%H:%M"),
                event.end.format("%H:%M"),
                event.title
            )?;
            if let Some(description) = &event.description {
                write!(f, " - {}", description)?;
            }
            writeln!(f, "  [{}]", event.id)?;
        }

        Ok(())
    }
}

impl fmt::Display for WeekView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in &self.days {
            write!(f, "{}", day)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn state() -> CalendarState {
        let utc = FixedOffset::east_opt(0).unwrap();
        let mut state = CalendarState::new();
        state.add(Event {
            id: "event-1".to_string(),
            title: "Dentist".to_string(),
            start: utc.with_ymd_and_hms(2024, 5, 8, 14, 0, 0).unwrap(),
            end: utc.with_ymd_and_hms(2024, 5, 8, 15, 0, 0).unwrap(),
            description: Some("Bring the referral".to_string()),
        });
        state.add(Event {
            id: "event-2".to_string(),
            title: "Conference".to_string(),
            start: utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap(),
            end: utc.with_ymd_and_hms(2024, 5, 11, 17, 0, 0).unwrap(),
            description: None,
        });
        state
    }

    #[test]
    fn test_week_view_starts_on_sunday() {
        let state = state();
        let week = week_view(&state, NaiveDate::from_ymd_opt(2024, 5, 8).unwrap());

        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days[0].date, NaiveDate::from_ymd_opt(2024, 5, 5).unwrap());
        assert_eq!(week.days[3].events.len(), 1);
        // The conference spans Friday and Saturday
        assert_eq!(week.days[5].events[0].id, "event-2");
        assert_eq!(week.days[6].events[0].id, "event-2");
        assert_eq!(week.placements(), 3);
    }

    #[test]
    fn test_day_view_rendering() {
        let state = state();
        let rendered = day_view(&state, NaiveDate::from_ymd_opt(2024, 5, 8).unwrap()).to_string();
        assert_eq!(
            rendered,
            "Wed 2024-05-08\n  14:00-15:00  Dentist - Bring the referral  [event-1]\n"
        );

        let empty = day_view(&state, NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()).to_string();
        assert_eq!(empty, "Thu 2024-05-09\n  (no events)\n");
    }
}
