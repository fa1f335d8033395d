//! Card catalog for definition lookup.
//!
//! The `CardCatalog` is the immutable library of card definitions for a
//! match. Every lookup hands back a fresh copy of the definition; callers
//! never hold a reference into the catalog.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use crate::core::{CatalogError, GameRng};

/// Library of card definitions.
///
/// Keeps insertion order alongside the id index so random picks are
/// reproducible for a given seed.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{CardCatalog, CardDefinition, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::new(CardId::new(1), "Archer", 4, 4)).unwrap();
///
/// let found = catalog.get_by_id(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Archer");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
    order: Vec<CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of definitions.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = CardDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.register(definition)?;
        }
        Ok(catalog)
    }

    /// The built-in ten-card library.
    #[must_use]
    pub fn default_library() -> Self {
        let definitions = [
            (1, "Novice Warrior", 5, 3),
            (2, "Veteran Warrior", 7, 4),
            (3, "Elite Warrior", 10, 6),
            (4, "Novice Mage", 3, 5),
            (5, "Adept Mage", 4, 7),
            (6, "Novice Guard", 8, 2),
            (7, "Veteran Guard", 12, 3),
            (8, "Archer", 4, 4),
            (9, "Crossbowman", 5, 5),
            (10, "Healer", 6, 2),
        ];

        let mut catalog = Self::new();
        for (id, name, health, attack) in definitions {
            let id = CardId::new(id);
            catalog.order.push(id);
            catalog
                .cards
                .insert(id, CardDefinition::new(id, name, health, attack));
        }
        catalog
    }

    /// Register a card definition.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), CatalogError> {
        if self.cards.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId(card.id));
        }
        self.order.push(card.id);
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Copy of the definition with the given id.
    pub fn get_by_id(&self, id: CardId) -> Result<CardDefinition, CatalogError> {
        self.cards
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// Copy of a uniformly chosen definition.
    ///
    /// An empty catalog is a configuration fault and is reported, never
    /// papered over.
    pub fn get_random(&self, rng: &mut GameRng) -> Result<CardDefinition, CatalogError> {
        let id = rng.choose(&self.order).ok_or(CatalogError::EmptyCatalog)?;
        self.get_by_id(*id)
    }

    /// Look up by id, falling back to a random definition when the id is unknown.
    pub fn get_or_random(
        &self,
        id: CardId,
        rng: &mut GameRng,
    ) -> Result<CardDefinition, CatalogError> {
        match self.get_by_id(id) {
            Ok(definition) => Ok(definition),
            Err(CatalogError::NotFound(_)) => {
                log::warn!("{} not in catalog, substituting a random card", id);
                self.get_random(rng)
            }
            Err(err) => Err(err),
        }
    }

    /// Random deck of `size` catalog ids, top of deck first.
    pub fn random_deck(&self, size: usize, rng: &mut GameRng) -> Result<Vec<CardId>, CatalogError> {
        if self.order.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        Ok((0..size)
            .map(|_| self.order[rng.gen_range_usize(0..self.order.len())])
            .collect())
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }
}
