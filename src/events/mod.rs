//! Outbound notifications.
//!
//! The match engine publishes `MatchEvent`s to a single `MatchListener`
//! supplied at construction. Tests use the recording `EventLog`; headless
//! runs use `NullListener`.

pub mod event;
pub mod listener;

pub use event::MatchEvent;
pub use listener::{EventLog, MatchListener, NullListener};
