//! Per-side state: health, hand, deck and graveyard.

pub mod state;

pub use state::{HealthChange, PlayerState};
