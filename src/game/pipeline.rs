//! Timed phase steps.
//!
//! Every automatic transition is split into discrete steps queued on the
//! controller. A step runs to completion before the next one starts, and
//! its delay is only a hint for the presentation layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Pacing, Side};

/// One step of an automatic phase sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseStep {
    /// Opening banner.
    Intro,
    /// Starting hand notice.
    DealNotice,
    /// Enter the player's turn.
    BeginPlayerTurn,
    /// The enemy agent places a card.
    EnemyPlace,
    /// Enter the battle phase.
    BeginBattle,
    /// Player-side attacks.
    PlayerAttacks,
    /// Enemy-side attacks.
    EnemyAttacks,
    /// Consistency check, attack reset, next turn.
    FinishBattle,
}

impl PhaseStep {
    /// Steps queued by a match start.
    pub const OPENING: [PhaseStep; 3] = [
        PhaseStep::Intro,
        PhaseStep::DealNotice,
        PhaseStep::BeginPlayerTurn,
    ];

    /// Steps queued when the player ends the turn.
    pub const ENEMY_AND_BATTLE: [PhaseStep; 5] = [
        PhaseStep::EnemyPlace,
        PhaseStep::BeginBattle,
        PhaseStep::PlayerAttacks,
        PhaseStep::EnemyAttacks,
        PhaseStep::FinishBattle,
    ];

    /// Wait before running this step.
    #[must_use]
    pub fn delay(self, pacing: &Pacing) -> Duration {
        match self {
            PhaseStep::Intro => pacing.intro,
            PhaseStep::DealNotice => pacing.deal_notice,
            PhaseStep::BeginPlayerTurn => Duration::ZERO,
            PhaseStep::EnemyPlace => pacing.enemy_think,
            PhaseStep::BeginBattle => pacing.enemy_act,
            PhaseStep::PlayerAttacks => pacing.battle_start,
            PhaseStep::EnemyAttacks => pacing.sub_phase,
            PhaseStep::FinishBattle => pacing.sub_phase + pacing.cleanup,
        }
    }

    /// The side whose attacks this step resolves.
    #[must_use]
    pub const fn attacking_side(self) -> Option<Side> {
        match self {
            PhaseStep::PlayerAttacks => Some(Side::Player),
            PhaseStep::EnemyAttacks => Some(Side::Enemy),
            _ => None,
        }
    }
}
