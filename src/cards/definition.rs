//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type:
//! "Veteran Warrior" always has 4 attack and 7 health. Live cards copy
//! a definition by value when they are created, so nothing that happens
//! to the catalog afterwards can reach a card already in play.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card, not a specific instance in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{CardDefinition, CardId};
///
/// let archer = CardDefinition::new(CardId::new(8), "Archer", 4, 4).with_mana_cost(2);
///
/// assert_eq!(archer.attack, 4);
/// assert_eq!(archer.description, "Archer - Attack:4 Health:4");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Flavour / rules text.
    pub description: String,

    /// Maximum (and starting) health.
    pub health: i32,

    /// Damage dealt per attack.
    pub attack: i32,

    /// Reserved; the engine does not charge mana yet.
    pub mana_cost: i32,

    /// Side this card belongs to when none is given explicitly.
    pub default_side: Side,
}

impl CardDefinition {
    /// Create a new card definition with a generated description.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, health: i32, attack: i32) -> Self {
        let name = name.into();
        let description = format!("{} - Attack:{} Health:{}", name, attack, health);
        Self {
            id,
            name,
            description,
            health,
            attack,
            mana_cost: 0,
            default_side: Side::Player,
        }
    }

    /// Replace the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the mana cost (builder pattern).
    #[must_use]
    pub fn with_mana_cost(mut self, cost: i32) -> Self {
        self.mana_cost = cost;
        self
    }

    /// Set the default side (builder pattern).
    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.default_side = side;
        self
    }
}
