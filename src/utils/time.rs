use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Timelike, Weekday};

/// Suffix of a 12-hour clock reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Parse an `am`/`pm` suffix, ignoring case
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "am" => Some(Meridiem::Am),
            "pm" => Some(Meridiem::Pm),
            _ => None,
        }
    }
}

/// Convert a 12-hour clock hour to a 24-hour one.
///
/// `pm` adds 12 unless the hour is already 12 or more, `12am` is midnight.
/// Out-of-range hours are passed through unchanged.
pub fn to_24_hour(hour: u32, meridiem: Option<Meridiem>) -> u32 {
    match meridiem {
        Some(Meridiem::Pm) if hour < 12 => hour + 12,
        Some(Meridiem::Am) if hour == 12 => 0,
        _ => hour,
    }
}

/// Midnight at the start of the instant's day, keeping its offset
pub fn start_of_day(instant: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let since_midnight = Duration::seconds(i64::from(instant.num_seconds_from_midnight()))
        + Duration::nanoseconds(i64::from(instant.nanosecond()));
    instant
        .checked_sub_signed(since_midnight)
        .unwrap_or(*instant)
}

/// Instant `days` calendar days after the given one.
///
/// Returns `None` past the representable range.
pub fn add_days(instant: &DateTime<FixedOffset>, days: i64) -> Option<DateTime<FixedOffset>> {
    instant.checked_add_signed(Duration::try_days(days)?)
}

/// Place a clock reading on a day.
///
/// Hours past 23 and minutes past 59 roll over into the following hours and
/// days instead of failing. Returns `None` past the representable range.
pub fn at_clock_time(
    day_start: &DateTime<FixedOffset>,
    hour: u32,
    minute: u32,
) -> Option<DateTime<FixedOffset>> {
    let reading = Duration::hours(i64::from(hour)) + Duration::minutes(i64::from(minute));
    day_start.checked_add_signed(reading)
}

/// Forward day offset from `current` to `target`, Sunday-based, modulo 7.
///
/// The same weekday yields 0, not 7.
pub fn days_until_weekday(current: Weekday, target: Weekday) -> i64 {
    let current = i64::from(current.num_days_from_sunday());
    let target = i64::from(target.num_days_from_sunday());
    (target - current + 7) % 7
}

/// Parse a full English weekday name, ignoring case
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    match name.trim().to_ascii_lowercase().as_str() {
        "sunday" => Some(Weekday::Sun),
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}

/// First and last day (Sunday to Saturday) of the week containing `date`
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let sunday = date
        .checked_sub_signed(Duration::days(i64::from(
            date.weekday().num_days_from_sunday(),
        )))
        .unwrap_or(date);

    let saturday = sunday
        .checked_add_signed(Duration::days(6))
        .unwrap_or(sunday);

    (sunday, saturday)
}
