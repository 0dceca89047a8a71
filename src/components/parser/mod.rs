//! Plain-language message parsing.
//!
//! [`parse_command`] classifies an intent and builds an event draft for add
//! requests. [`extract_events`] pulls events out of free chat text. Both read
//! messages through the same cue table in [`grammar`].

pub mod command;
pub mod extract;
pub mod grammar;

pub use command::parse_command;
pub use extract::{extract_events, Extraction};
pub use grammar::{Cues, DateCue, TimeCue, DEFAULT_TITLE};
