//! Cue table shared by the command parser and the event extractor.
//!
//! Every regular expression the assistant uses to read a message lives here,
//! together with the rules that turn matched cues into instants.

use crate::models::Action;
use crate::utils::time::{
    add_days, at_clock_time, days_until_weekday, parse_weekday, start_of_day, to_24_hour,
    Meridiem,
};
use chrono::{DateTime, Datelike, Duration, FixedOffset, Weekday};
use lazy_static::lazy_static;
use regex::Regex;

/// Title used when a message has no text before its first cue
pub const DEFAULT_TITLE: &str = "New Event";

/// Event length when no duration phrase is given
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Intent keywords, checked in order; the first group with a hit wins
const INTENT_KEYWORDS: [(Action, [&str; 2]); 4] = [
    (Action::Add, ["add", "schedule"]),
    (Action::Remove, ["remove", "delete"]),
    (Action::Update, ["update", "change"]),
    (Action::View, ["view", "show"]),
];

lazy_static! {
    /// "at 2pm", "from 9:30 am", "at 14"
    static ref TIME_CUE: Regex = Regex::new(
        r"(?i)\b(?:at|from)\s+(?P<time>(?P<hour>\d{1,2})(?::(?P<minute>\d{2}))?\s*(?P<meridiem>am|pm)?)\b"
    )
    .expect("time cue regex");

    /// "on", "today", "tomorrow", "next friday"
    static ref DATE_CUE: Regex = Regex::new(
        r"(?i)\b(?:next\s+(?P<weekday>sunday|monday|tuesday|wednesday|thursday|friday|saturday)|(?P<word>tomorrow|today|on))\b"
    )
    .expect("date cue regex");

    /// "for 2 hours", "lasting 45 min"
    static ref DURATION_CUE: Regex = Regex::new(
        r"(?i)\b(?:for|lasting)\s+(?P<amount>\d+)\s*(?P<unit>hours?|hrs?|minutes?|mins?)\b"
    )
    .expect("duration cue regex");

    /// Words that end the title part of a message
    static ref TITLE_END: Regex = Regex::new(
        r"(?i)\b(?:at|from|on|tomorrow|today|next\s+(?:sun|mon|tues|wednes|thurs|fri|satur)day)\b"
    )
    .expect("title boundary regex");
}

/// Clock time found after `at` or `from`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeCue {
    /// Hour on the 24-hour clock; may exceed 23 for impossible readings
    pub hour: u32,
    pub minute: u32,
    /// The time as written, e.g. `2:30pm`
    pub text: String,
}

/// Date phrase found in a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCue {
    /// Bare "on"; keeps the caller's default day
    On,
    Today,
    Tomorrow,
    Next(Weekday),
}

impl DateCue {
    /// Days from `now` to the day this cue names
    pub fn day_offset(&self, now: &DateTime<FixedOffset>, default_offset: i64) -> i64 {
        match self {
            DateCue::On => default_offset,
            DateCue::Today => 0,
            DateCue::Tomorrow => 1,
            DateCue::Next(weekday) => days_until_weekday(now.weekday(), *weekday),
        }
    }

    /// Phrase used when echoing the cue back to the user
    pub fn describe(&self) -> Option<String> {
        match self {
            DateCue::On => None,
            DateCue::Today => Some("today".to_string()),
            DateCue::Tomorrow => Some("tomorrow".to_string()),
            DateCue::Next(weekday) => Some(format!("next {}", weekday_name(*weekday))),
        }
    }
}

/// What the start time is when a message names no clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsetTime {
    Midnight,
    CurrentTime,
}

/// Fallbacks applied when a message leaves the date or time open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleDefaults {
    pub day_offset: i64,
    pub unset_time: UnsetTime,
}

/// Every cue found in one message
#[derive(Debug, Clone, PartialEq)]
pub struct Cues {
    pub title: String,
    pub time: Option<TimeCue>,
    pub date: Option<DateCue>,
    pub duration: Option<Duration>,
}

impl Cues {
    /// Scan a message for all cues
    pub fn scan(input: &str) -> Self {
        Self {
            title: extract_title(input),
            time: find_time(input),
            date: find_date(input),
            duration: find_duration(input),
        }
    }

    /// Whether the message says anything about when
    pub fn has_schedule(&self) -> bool {
        self.time.is_some() || self.date.is_some()
    }

    /// Resolve start and end instants relative to `now`.
    ///
    /// Readings that land outside the representable range fall back to `now`
    /// for the start and to the default duration for the end.
    pub fn schedule(
        &self,
        now: &DateTime<FixedOffset>,
        defaults: ScheduleDefaults,
    ) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        let offset = self
            .date
            .map(|cue| cue.day_offset(now, defaults.day_offset))
            .unwrap_or(defaults.day_offset);
        let day = add_days(now, offset).unwrap_or(*now);

        let start = match (&self.time, defaults.unset_time) {
            (Some(time), _) => {
                at_clock_time(&start_of_day(&day), time.hour, time.minute).unwrap_or(day)
            }
            (None, UnsetTime::Midnight) => start_of_day(&day),
            (None, UnsetTime::CurrentTime) => day,
        };

        let end = self
            .duration
            .and_then(|duration| start.checked_add_signed(duration))
            .or_else(|| start.checked_add_signed(Duration::minutes(DEFAULT_DURATION_MINUTES)))
            .unwrap_or(start);

        (start, end)
    }
}

/// Classify the intent of a message by keyword, case-insensitively
pub fn classify_intent(input: &str) -> Option<Action> {
    let lower = input.to_lowercase();
    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(action, _)| *action)
}

/// Text before the first cue word, or the placeholder title
pub fn extract_title(input: &str) -> String {
    let title = match TITLE_END.find(input) {
        Some(cue) => input[..cue.start()].trim(),
        None => "",
    };

    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// First clock time after `at` or `from`
pub fn find_time(input: &str) -> Option<TimeCue> {
    let captures = TIME_CUE.captures(input)?;

    let hour = captures.name("hour")?.as_str().parse::<u32>().ok()?;
    let minute = match captures.name("minute") {
        Some(minute) => minute.as_str().parse::<u32>().ok()?,
        None => 0,
    };
    let meridiem = captures
        .name("meridiem")
        .and_then(|m| Meridiem::parse(m.as_str()));

    Some(TimeCue {
        hour: to_24_hour(hour, meridiem),
        minute,
        text: captures.name("time")?.as_str().trim().to_string(),
    })
}

/// First date phrase in the message
pub fn find_date(input: &str) -> Option<DateCue> {
    let captures = DATE_CUE.captures(input)?;

    if let Some(weekday) = captures.name("weekday") {
        return parse_weekday(weekday.as_str()).map(DateCue::Next);
    }

    match captures.name("word")?.as_str().to_lowercase().as_str() {
        "today" => Some(DateCue::Today),
        "tomorrow" => Some(DateCue::Tomorrow),
        _ => Some(DateCue::On),
    }
}

/// First duration phrase in the message; amounts too large for a duration are ignored
pub fn find_duration(input: &str) -> Option<Duration> {
    let captures = DURATION_CUE.captures(input)?;
    let amount = captures.name("amount")?.as_str().parse::<i64>().ok()?;
    let unit = captures.name("unit")?.as_str().to_lowercase();

    if unit.starts_with('h') {
        Duration::try_hours(amount)
    } else {
        Duration::try_minutes(amount)
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
    }
}
