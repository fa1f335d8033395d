//! Match outcome.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    PlayerWon,
    EnemyWon,
}

impl MatchResult {
    /// Outcome from the player's point of view.
    #[must_use]
    pub const fn from_player_won(player_won: bool) -> Self {
        if player_won {
            MatchResult::PlayerWon
        } else {
            MatchResult::EnemyWon
        }
    }

    /// Outcome when `loser` ran out of health.
    #[must_use]
    pub const fn lost_by(loser: Side) -> Self {
        match loser {
            Side::Player => MatchResult::EnemyWon,
            Side::Enemy => MatchResult::PlayerWon,
        }
    }

    #[must_use]
    pub const fn winner(self) -> Side {
        match self {
            MatchResult::PlayerWon => Side::Player,
            MatchResult::EnemyWon => Side::Enemy,
        }
    }

    #[must_use]
    pub const fn player_won(self) -> bool {
        matches!(self, MatchResult::PlayerWon)
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(self, side: Side) -> bool {
        self.winner() == side
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::PlayerWon => write!(f, "Victory"),
            MatchResult::EnemyWon => write!(f, "Defeat"),
        }
    }
}
