//! Enemy decision seam.
//!
//! The controller asks an `EnemyAgent` for at most one play per enemy
//! turn and validates whatever comes back like any other placement
//! request. An illegal choice is rejected, never applied.

use crate::cards::CardPool;
use crate::core::{InstanceId, MatchState};
use crate::player::PlayerState;
use crate::zones::{SlotGrid, SlotRef};

/// A placement chosen by an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyPlay {
    pub card: InstanceId,
    pub slot: SlotRef,
}

/// Decides the enemy's placement for a turn.
pub trait EnemyAgent {
    /// Pick a card from `me`'s hand and a slot for it, or pass.
    fn choose_play(&mut self, me: &PlayerState, pool: &CardPool, grid: &SlotGrid)
        -> Option<EnemyPlay>;
}

/// Plays the first placeable card in hand into the first empty slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderEnemy;

impl EnemyAgent for PlaceholderEnemy {
    fn choose_play(
        &mut self,
        me: &PlayerState,
        pool: &CardPool,
        grid: &SlotGrid,
    ) -> Option<EnemyPlay> {
        let slot = grid.find_empty(me.side())?;
        me.hand()
            .iter()
            .copied()
            .find(|id| {
                pool.get(*id)
                    .is_some_and(|card| grid.can_accept(slot, card, MatchState::EnemyTurn))
            })
            .map(|card| EnemyPlay { card, slot })
    }
}

/// Never plays anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveEnemy;

impl EnemyAgent for PassiveEnemy {
    fn choose_play(&mut self, _: &PlayerState, _: &CardPool, _: &SlotGrid) -> Option<EnemyPlay> {
        None
    }
}
