use super::grammar::{classify_intent, Cues, ScheduleDefaults, UnsetTime};
use crate::models::{Action, EventDraft, ParsedCommand};
use chrono::{DateTime, FixedOffset};
use tracing::debug;

/// Add requests without a date land on tomorrow, at midnight unless a time is given
const COMMAND_DEFAULTS: ScheduleDefaults = ScheduleDefaults {
    day_offset: 1,
    unset_time: UnsetTime::Midnight,
};

/// Parse a calendar command relative to `now`.
///
/// Only add requests carry an event. Messages without an intent keyword are
/// reported as an add with an error and no event.
pub fn parse_command(input: &str, now: DateTime<FixedOffset>) -> ParsedCommand {
    let Some(action) = classify_intent(input) else {
        debug!("No intent keyword in command: {}", input);
        return ParsedCommand::unrecognized();
    };

    if action != Action::Add {
        return ParsedCommand::for_action(action);
    }

    let cues = Cues::scan(input);
    let (start, end) = cues.schedule(&now, COMMAND_DEFAULTS);

    ParsedCommand {
        action,
        event: Some(EventDraft {
            title: cues.title,
            start,
            end,
            description: None,
        }),
        error: None,
    }
}
