//! Outbound match notifications.
//!
//! The controller publishes a `MatchEvent` for everything the presentation
//! layer needs to re-render. Events are facts about state that has already
//! changed; listeners cannot veto them.

use serde::{Deserialize, Serialize};

use crate::core::{InstanceId, MatchState, Side};

/// A notification published by the match controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A side's health changed.
    HealthChanged {
        side: Side,
        health: i32,
        max_health: i32,
    },

    /// A battlefield card died and was moved to its owner's graveyard.
    CardDied {
        card: InstanceId,
        side: Side,
        name: String,
    },

    /// The match state machine moved.
    StateChanged { state: MatchState, turn: u32 },

    /// Text for the message banner.
    Message { text: String, is_warning: bool },

    /// The match ended.
    GameOver { player_won: bool },
}

impl MatchEvent {
    /// Informational banner text.
    pub fn info(text: impl Into<String>) -> Self {
        MatchEvent::Message {
            text: text.into(),
            is_warning: false,
        }
    }

    /// Warning banner text.
    pub fn warning(text: impl Into<String>) -> Self {
        MatchEvent::Message {
            text: text.into(),
            is_warning: true,
        }
    }

    /// Is this a warning message?
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, MatchEvent::Message { is_warning: true, .. })
    }
}

impl std::fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchEvent::HealthChanged {
                side,
                health,
                max_health,
            } => write!(f, "{} health {}/{}", side, health, max_health),
            MatchEvent::CardDied { card, side, name } => {
                write!(f, "{} {} died ({})", side, name, card)
            }
            MatchEvent::StateChanged { state, turn } => write!(f, "turn {}: {}", turn, state),
            MatchEvent::Message { text, is_warning } => {
                if *is_warning {
                    write!(f, "warning: {}", text)
                } else {
                    write!(f, "{}", text)
                }
            }
            MatchEvent::GameOver { player_won } => {
                write!(f, "game over, {} wins", if *player_won { "player" } else { "enemy" })
            }
        }
    }
}
