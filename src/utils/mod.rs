pub mod clock;
pub mod i18n;
pub mod ids;
pub mod time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
