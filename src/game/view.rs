//! Serializable match snapshots for the presentation layer.
//!
//! A snapshot is a plain copy of what is visible on screen. Building one
//! never mutates the match.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardInstance, CardPool};
use crate::core::{InstanceId, MatchState, Side, SideMap};
use crate::player::PlayerState;
use crate::zones::SlotGrid;

/// One visible card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub instance: InstanceId,
    pub card_id: Option<CardId>,
    pub name: String,
    pub description: String,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub can_attack: bool,
}

impl CardView {
    #[must_use]
    pub fn of(card: &CardInstance) -> Self {
        Self {
            instance: card.id(),
            card_id: card.card_id(),
            name: card.name().to_string(),
            description: card
                .definition()
                .map(|d| d.description.clone())
                .unwrap_or_default(),
            attack: card.attack(),
            health: card.health(),
            max_health: card.max_health(),
            can_attack: card.can_attack(),
        }
    }
}

/// One side of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideView {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub hand: Vec<CardView>,
    /// One entry per slot, index order.
    pub slots: Vec<Option<CardView>>,
    pub deck_size: usize,
    pub graveyard_size: usize,
}

impl SideView {
    #[must_use]
    pub fn of(player: &PlayerState, grid: &SlotGrid, pool: &CardPool) -> Self {
        let view = |id: &InstanceId| pool.get(*id).map(CardView::of);
        Self {
            name: player.name().to_string(),
            health: player.health(),
            max_health: player.max_health(),
            hand: player.hand().iter().filter_map(view).collect(),
            slots: grid
                .row(player.side())
                .iter()
                .map(|slot| slot.as_ref().and_then(view))
                .collect(),
            deck_size: player.deck().len(),
            graveyard_size: player.graveyard().len(),
        }
    }
}

/// Whole-match snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub state: MatchState,
    pub turn: u32,
    pub sides: SideMap<SideView>,
}

impl MatchSnapshot {
    /// One side's view.
    #[must_use]
    pub fn side(&self, side: Side) -> &SideView {
        &self.sides[side]
    }
}
