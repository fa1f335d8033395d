//! Sides and per-side data storage.
//!
//! ## Side
//!
//! The two combatants of a match: `Player` and `Enemy`.
//!
//! ## SideMap
//!
//! Fixed two-entry storage indexed by `Side`, used for everything the
//! engine keeps once per combatant (player state, slot rows, decklists).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two combatants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human-controlled side.
    Player,
    /// The AI-controlled side.
    Enemy,
}

impl Side {
    /// Both sides in combat order (player first).
    pub const BOTH: [Side; 2] = [Side::Player, Side::Enemy];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Iterate over both sides in combat order.
    pub fn all() -> impl Iterator<Item = Side> {
        Self::BOTH.into_iter()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Enemy => write!(f, "Enemy"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use card_duel::core::{Side, SideMap};
///
/// let mut life: SideMap<i32> = SideMap::with_value(30);
/// life[Side::Enemy] -= 4;
///
/// assert_eq!(life[Side::Player], 30);
/// assert_eq!(life[Side::Enemy], 26);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    player: T,
    enemy: T,
}

impl<T> SideMap<T> {
    /// Create a SideMap with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            player: factory(Side::Player),
            enemy: factory(Side::Enemy),
        }
    }

    /// Create a SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            player: value.clone(),
            enemy: value,
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Mutable access to both entries at once, in `(player, enemy)` order.
    pub fn both_mut(&mut self) -> (&mut T, &mut T) {
        (&mut self.player, &mut self.enemy)
    }

    /// Iterate over (Side, &T) pairs in combat order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Player, &self.player), (Side::Enemy, &self.enemy)].into_iter()
    }

    /// Transform each entry, keeping the side association.
    pub fn map<U>(self, mut f: impl FnMut(Side, T) -> U) -> SideMap<U> {
        SideMap {
            player: f(Side::Player, self.player),
            enemy: f(Side::Enemy, self.enemy),
        }
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
