//! Match state machine states and turn tracking.
//!
//! ```text
//! None ──start──▶ PlayerTurn ──end turn──▶ EnemyTurn ──enemy done──▶ BattlePhase
//!                     ▲                                                  │
//!                     └──────────────── combat resolved (turn + 1) ──────┘
//!
//! any state ──player at 0 health / forced end──▶ GameOver (terminal)
//! ```

use serde::{Deserialize, Serialize};

use super::player::Side;

/// Current state of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    /// No match in progress yet.
    #[default]
    None,
    /// The player may place cards and end the turn.
    PlayerTurn,
    /// The enemy agent is acting.
    EnemyTurn,
    /// Combat is being resolved.
    BattlePhase,
    /// Terminal. Only a new match start leaves this state.
    GameOver,
}

impl MatchState {
    /// The side allowed to act in this state, if any.
    #[must_use]
    pub const fn acting_side(self) -> Option<Side> {
        match self {
            MatchState::PlayerTurn => Some(Side::Player),
            MatchState::EnemyTurn => Some(Side::Enemy),
            _ => None,
        }
    }

    /// Is this the battle phase?
    #[must_use]
    pub const fn is_battle_phase(self) -> bool {
        matches!(self, MatchState::BattlePhase)
    }

    /// Is this the terminal state?
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, MatchState::GameOver)
    }
}

impl std::fmt::Display for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatchState::None => "None",
            MatchState::PlayerTurn => "PlayerTurn",
            MatchState::EnemyTurn => "EnemyTurn",
            MatchState::BattlePhase => "BattlePhase",
            MatchState::GameOver => "GameOver",
        };
        write!(f, "{}", name)
    }
}

/// State plus turn counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPhase {
    /// Current state.
    pub state: MatchState,

    /// Turn number (starts at 1, only ever increases).
    pub turn_number: u32,
}

impl Default for MatchPhase {
    fn default() -> Self {
        Self {
            state: MatchState::None,
            turn_number: 1,
        }
    }
}

impl MatchPhase {
    /// Fresh phase tracker for a new match.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived battle flag.
    #[must_use]
    pub fn is_battle_phase(&self) -> bool {
        self.state.is_battle_phase()
    }

    /// Advance to the next turn.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
    }
}
