//! Per-side match state.
//!
//! `PlayerState` holds one side's health and card rosters. Rosters use
//! persistent collections (`im`) so snapshots for the presentation layer
//! are O(1) clones.
//!
//! ## Roster invariant
//!
//! A live card handle is in exactly one of: this hand, a battlefield slot,
//! this graveyard. Roster mutations here remove before they add; moving a
//! card onto the battlefield is the grid's job.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId, CardLocation, CardPool};
use crate::core::{DrawError, GameRng, InstanceId, Side};

/// Result of a health mutation, forwarded to listeners as `HealthChanged`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthChange {
    pub health: i32,
    pub max_health: i32,
    /// Set only on the call that first brought health to zero.
    pub died: bool,
}

/// Health and card rosters of one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    name: String,
    side: Side,
    health: i32,
    max_health: i32,
    hand: Vector<InstanceId>,
    /// Draw order, front is the top of the deck.
    deck: Vector<CardId>,
    graveyard: OrdSet<InstanceId>,
    death_reported: bool,
}

impl PlayerState {
    /// Create a side at full health with an empty deck.
    #[must_use]
    pub fn new(name: impl Into<String>, side: Side, max_health: i32) -> Self {
        let max_health = max_health.max(0);
        Self {
            name: name.into(),
            side,
            health: max_health,
            max_health,
            hand: Vector::new(),
            deck: Vector::new(),
            graveyard: OrdSet::new(),
            death_reported: false,
        }
    }

    /// Restore full health and load a new deck. Rosters must already be empty.
    pub fn reset(&mut self, name: impl Into<String>, max_health: i32, deck: Vec<CardId>) {
        debug_assert!(self.hand.is_empty() && self.graveyard.is_empty());
        self.name = name.into();
        self.max_health = max_health.max(0);
        self.health = self.max_health;
        self.deck = deck.into_iter().collect();
        self.death_reported = false;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Hand in draw order.
    #[must_use]
    pub fn hand(&self) -> &Vector<InstanceId> {
        &self.hand
    }

    /// Remaining deck, top first.
    #[must_use]
    pub fn deck(&self) -> &Vector<CardId> {
        &self.deck
    }

    #[must_use]
    pub fn graveyard(&self) -> &OrdSet<InstanceId> {
        &self.graveyard
    }

    /// Is this card in the hand?
    #[must_use]
    pub fn holds(&self, card: InstanceId) -> bool {
        self.hand.index_of(&card).is_some()
    }

    /// Draw the top card of the deck into the hand.
    ///
    /// A full hand is checked first and leaves the deck untouched. An id the
    /// catalog no longer knows is replaced by a random definition.
    pub fn draw(
        &mut self,
        catalog: &CardCatalog,
        pool: &mut CardPool,
        rng: &mut GameRng,
        max_hand_size: usize,
    ) -> Result<InstanceId, DrawError> {
        if self.hand.len() >= max_hand_size {
            return Err(DrawError::HandFull {
                side: self.side,
                size: self.hand.len(),
            });
        }
        let card_id = self.deck.pop_front().ok_or(DrawError::DeckEmpty(self.side))?;
        let definition = catalog.get_or_random(card_id, rng)?;

        let id = pool.spawn(definition, self.side);
        if let Some(card) = pool.get_mut(id) {
            if let Err(err) = card.move_to(CardLocation::Hand) {
                log::error!("freshly spawned card failed to enter hand: {}", err);
            }
        }
        self.hand.push_back(id);
        log::debug!("{} drew {} ({} in hand)", self.name, id, self.hand.len());
        Ok(id)
    }

    /// Apply damage to this side.
    ///
    /// Returns `None` for non-positive amounts. `died` is reported once per
    /// match, no matter how often health is pushed to zero.
    pub fn take_damage(&mut self, amount: i32) -> Option<HealthChange> {
        if amount <= 0 {
            return None;
        }
        let before = self.health;
        self.health = (self.health - amount).max(0);
        let died = self.health == 0 && !self.death_reported;
        if died {
            self.death_reported = true;
        }
        log::debug!(
            "{} takes {} damage ({} -> {})",
            self.name,
            amount,
            before,
            self.health
        );
        Some(self.health_change(died))
    }

    /// Restore health up to max. Returns `None` for non-positive amounts.
    pub fn heal(&mut self, amount: i32) -> Option<HealthChange> {
        if amount <= 0 {
            return None;
        }
        self.health = (self.health + amount).min(self.max_health);
        Some(self.health_change(false))
    }

    fn health_change(&self, died: bool) -> HealthChange {
        HealthChange {
            health: self.health,
            max_health: self.max_health,
            died,
        }
    }

    /// Append a card to the hand. Returns false if it is already there.
    pub fn add_to_hand(&mut self, card: InstanceId) -> bool {
        if self.holds(card) {
            return false;
        }
        self.graveyard.remove(&card);
        self.hand.push_back(card);
        true
    }

    /// Remove a card from the hand. Returns false if it was not there.
    pub fn remove_from_hand(&mut self, card: InstanceId) -> bool {
        match self.hand.index_of(&card) {
            Some(index) => {
                self.hand.remove(index);
                true
            }
            None => false,
        }
    }

    /// Record a card in the graveyard, dropping it from the hand first.
    pub fn move_to_graveyard(&mut self, card: InstanceId) {
        self.remove_from_hand(card);
        self.graveyard.insert(card);
    }

    /// Empty hand and graveyard, returning every handle they held.
    pub fn take_all_cards(&mut self) -> Vec<InstanceId> {
        let mut cards: Vec<_> = self.hand.iter().copied().collect();
        cards.extend(self.graveyard.iter().copied());
        self.hand.clear();
        self.graveyard = OrdSet::new();
        cards
    }

    /// "health/max" for display.
    #[must_use]
    pub fn health_info(&self) -> String {
        format!("{}/{}", self.health, self.max_health)
    }

    /// Roster sizes for display.
    #[must_use]
    pub fn card_count_info(&self) -> String {
        format!(
            "Hand: {} | Deck: {} | Graveyard: {}",
            self.hand.len(),
            self.deck.len(),
            self.graveyard.len()
        )
    }
}
