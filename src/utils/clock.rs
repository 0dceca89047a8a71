use chrono::{DateTime, FixedOffset, Local};

/// Source of the current time.
///
/// Date cues such as "tomorrow" or "next friday" resolve against this, so
/// tests can pin the moment a message was received.
pub trait Clock: Send + Sync {
    /// Current instant with the local offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock of the machine running the assistant
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}
