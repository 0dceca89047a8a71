#![allow(dead_code)]

use calendar_assistant::utils::{FixedClock, SequentialIds};
use calendar_assistant::web::AppState;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::sync::Arc;

/// Wednesday, 2024-05-08 10:17 UTC
pub fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 8, 10, 17, 0)
        .unwrap()
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(now()))
}

/// In-process state with a frozen clock and ids "event-1", "event-2", ...
pub fn app_state() -> AppState {
    AppState::local(clock(), Arc::new(SequentialIds::new("event")))
}
