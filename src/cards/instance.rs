//! Card instances - runtime card state.
//!
//! `CardInstance` is a live card in a match: a by-value copy of its
//! definition plus the mutable combat state (health, attack eligibility,
//! location, side).
//!
//! ## Lifecycle
//!
//! ```text
//! pool (unbound) ─initialize─▶ Deck ─▶ Hand ─▶ Battlefield ─▶ Graveyard ─release─▶ pool
//! ```
//!
//! `move_to` only allows the forward path; anything else is a
//! `LifecycleError`.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId};
use crate::core::{InstanceId, LifecycleError, Side};

/// Where a live card currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardLocation {
    Deck,
    Hand,
    Battlefield,
    Graveyard,
}

impl CardLocation {
    /// The only location a card may move to from here.
    #[must_use]
    pub const fn next(self) -> Option<CardLocation> {
        match self {
            CardLocation::Deck => Some(CardLocation::Hand),
            CardLocation::Hand => Some(CardLocation::Battlefield),
            CardLocation::Battlefield => Some(CardLocation::Graveyard),
            CardLocation::Graveyard => None,
        }
    }
}

/// A card instance in a match.
///
/// Unbound instances (fresh from the pool or just released) have no
/// definition, no side, no location and zero health.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    id: InstanceId,
    definition: Option<CardDefinition>,
    current_health: i32,
    can_attack_this_turn: bool,
    location: Option<CardLocation>,
    side: Option<Side>,
}

impl CardInstance {
    /// Create an unbound instance.
    #[must_use]
    pub fn unbound(id: InstanceId) -> Self {
        Self {
            id,
            definition: None,
            current_health: 0,
            can_attack_this_turn: true,
            location: None,
            side: None,
        }
    }

    /// Bind a definition copy and place the card in its deck.
    pub fn initialize(&mut self, definition: CardDefinition, side: Side) {
        self.current_health = definition.health.max(0);
        self.definition = Some(definition);
        self.can_attack_this_turn = true;
        self.location = Some(CardLocation::Deck);
        self.side = Some(side);
    }

    /// Return to the neutral, location-less state.
    pub fn reset(&mut self) {
        self.definition = None;
        self.current_health = 0;
        self.can_attack_this_turn = true;
        self.location = None;
        self.side = None;
    }

    /// Pool handle of this instance.
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// The bound definition snapshot.
    #[must_use]
    pub fn definition(&self) -> Option<&CardDefinition> {
        self.definition.as_ref()
    }

    /// Is a definition bound?
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.definition.is_some()
    }

    /// Definition id, if bound.
    #[must_use]
    pub fn card_id(&self) -> Option<CardId> {
        self.definition.as_ref().map(|d| d.id)
    }

    /// Card name, or a placeholder when unbound.
    #[must_use]
    pub fn name(&self) -> &str {
        self.definition
            .as_ref()
            .map_or("Unknown Card", |d| d.name.as_str())
    }

    /// Current health.
    #[must_use]
    pub fn health(&self) -> i32 {
        self.current_health
    }

    /// Max health from the definition snapshot.
    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.definition.as_ref().map_or(0, |d| d.health.max(0))
    }

    /// Attack from the definition snapshot.
    #[must_use]
    pub fn attack(&self) -> i32 {
        self.definition.as_ref().map_or(0, |d| d.attack)
    }

    /// Current location.
    #[must_use]
    pub fn location(&self) -> Option<CardLocation> {
        self.location
    }

    /// Owning side.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    /// Raw attack-eligibility flag.
    #[must_use]
    pub fn can_attack_this_turn(&self) -> bool {
        self.can_attack_this_turn
    }

    /// Eligible to attack right now: flag set and on the battlefield.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.can_attack_this_turn && self.location == Some(CardLocation::Battlefield)
    }

    /// Set the attack-eligibility flag.
    pub fn set_can_attack(&mut self, value: bool) {
        self.can_attack_this_turn = value;
    }

    /// Is health above zero?
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Apply damage, clamping at zero.
    ///
    /// Returns `true` only when this call took the card from alive to dead.
    /// Non-positive amounts are a no-op.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if amount <= 0 {
            return false;
        }
        let was_alive = self.is_alive();
        let before = self.current_health;
        self.current_health = (self.current_health - amount).max(0);
        log::debug!(
            "{} takes {} damage ({} -> {})",
            self.name(),
            amount,
            before,
            self.current_health
        );
        was_alive && !self.is_alive()
    }

    /// Restore health, clamping at max health. Non-positive amounts are a no-op.
    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        let before = self.current_health;
        self.current_health = (self.current_health + amount).min(self.max_health());
        log::debug!(
            "{} heals {} ({} -> {})",
            self.name(),
            amount,
            before,
            self.current_health
        );
    }

    /// Move one step along the lifecycle.
    pub fn move_to(&mut self, to: CardLocation) -> Result<(), LifecycleError> {
        match self.location {
            Some(from) if from.next() == Some(to) => {
                self.location = Some(to);
                Ok(())
            }
            from => Err(LifecycleError {
                card: self.id,
                from,
                to,
            }),
        }
    }
}

impl std::fmt::Display for CardInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [atk {} / hp {}/{}]",
            self.name(),
            self.attack(),
            self.current_health,
            self.max_health()
        )
    }
}
