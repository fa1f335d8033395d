//! Battlefield slot grid.
//!
//! Each side has a fixed row of slots; each slot holds at most one card
//! handle. The grid never owns card lifetime, it only references pooled
//! instances.
//!
//! Placement runs the same checks twice: once when the UI asks whether a
//! drop is legal (`can_accept`) and again inside `place` before anything
//! is mutated.

use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, CardLocation};
use crate::core::{InstanceId, MatchState, PlacementError, Side, SideMap, SlotError};

/// Address of one battlefield slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub side: Side,
    pub index: usize,
}

impl SlotRef {
    /// Create a slot address.
    #[must_use]
    pub const fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }

    /// The slot facing this one across the battlefield.
    #[must_use]
    pub const fn opposing(self) -> Self {
        Self {
            side: self.side.opponent(),
            index: self.index,
        }
    }
}

impl std::fmt::Display for SlotRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} slot {}", self.side, self.index)
    }
}

/// Fixed-capacity slot rows for both sides.
///
/// ## Usage
///
/// ```
/// use card_duel::cards::{CardDefinition, CardId, CardInstance};
/// use card_duel::core::{InstanceId, MatchState, Side};
/// use card_duel::zones::{SlotGrid, SlotRef};
///
/// let mut grid = SlotGrid::new(3);
/// let mut card = CardInstance::unbound(InstanceId::new(0));
/// card.initialize(CardDefinition::new(CardId::new(1), "Archer", 4, 4), Side::Player);
/// card.move_to(card_duel::cards::CardLocation::Hand).unwrap();
///
/// let slot = grid.find_empty(Side::Player).unwrap();
/// assert!(grid.try_place(slot, &mut card, MatchState::PlayerTurn));
/// assert_eq!(grid.occupant(SlotRef::new(Side::Player, 0)), Some(InstanceId::new(0)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrid {
    rows: SideMap<Vec<Option<InstanceId>>>,
}

impl SlotGrid {
    /// Create a grid with `slots_per_side` empty slots on each side.
    #[must_use]
    pub fn new(slots_per_side: usize) -> Self {
        Self {
            rows: SideMap::with_value(vec![None; slots_per_side]),
        }
    }

    /// Slots per side.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.rows[Side::Player].len()
    }

    fn check_range(&self, slot: SlotRef) -> Result<(), SlotError> {
        let count = self.rows[slot.side].len();
        if slot.index >= count {
            return Err(SlotError::OutOfRange {
                side: slot.side,
                index: slot.index,
                count,
            });
        }
        Ok(())
    }

    /// Card in a slot, if any. Out-of-range slots read as empty.
    #[must_use]
    pub fn occupant(&self, slot: SlotRef) -> Option<InstanceId> {
        self.rows[slot.side].get(slot.index).copied().flatten()
    }

    /// Card in a slot, distinguishing out-of-range from empty.
    pub fn require_occupant(&self, slot: SlotRef) -> Result<InstanceId, SlotError> {
        self.check_range(slot)?;
        self.occupant(slot).ok_or(SlotError::SlotEmpty {
            side: slot.side,
            index: slot.index,
        })
    }

    /// Is this slot empty? Out-of-range slots are not.
    #[must_use]
    pub fn is_empty(&self, slot: SlotRef) -> bool {
        matches!(self.rows[slot.side].get(slot.index), Some(None))
    }

    /// Run every placement rule in order, reporting the first failure.
    ///
    /// Rules: slot in range and empty, card side matches slot side, card is
    /// in hand, it is the slot side's turn, and combat is not running.
    pub fn check_accept(
        &self,
        slot: SlotRef,
        card: &CardInstance,
        state: MatchState,
    ) -> Result<(), PlacementError> {
        self.check_range(slot)?;
        if !self.is_empty(slot) {
            return Err(PlacementError::SlotOccupied {
                side: slot.side,
                index: slot.index,
            });
        }
        let card_side = card.side().ok_or(PlacementError::UnknownCard(card.id()))?;
        if card_side != slot.side {
            return Err(PlacementError::SideMismatch {
                slot_side: slot.side,
                card_side,
            });
        }
        if card.location() != Some(CardLocation::Hand) {
            return Err(PlacementError::NotInHand(card.location()));
        }
        if state.is_battle_phase() {
            return Err(PlacementError::BattleInProgress);
        }
        if state.acting_side() != Some(slot.side) {
            return Err(PlacementError::WrongPhase {
                side: slot.side,
                state,
            });
        }
        Ok(())
    }

    /// Would `place` succeed right now?
    #[must_use]
    pub fn can_accept(&self, slot: SlotRef, card: &CardInstance, state: MatchState) -> bool {
        self.check_accept(slot, card, state).is_ok()
    }

    /// Validate, then move the card onto the battlefield and bind the slot.
    ///
    /// A freshly placed card may attack this turn. Nothing is mutated on
    /// failure.
    pub fn place(
        &mut self,
        slot: SlotRef,
        card: &mut CardInstance,
        state: MatchState,
    ) -> Result<(), PlacementError> {
        self.check_accept(slot, card, state)?;
        if card.move_to(CardLocation::Battlefield).is_err() {
            return Err(PlacementError::NotInHand(card.location()));
        }
        self.rows[slot.side][slot.index] = Some(card.id());
        card.set_can_attack(true);
        log::debug!("{} placed into {}", card.name(), slot);
        Ok(())
    }

    /// Boolean form of `place`.
    pub fn try_place(&mut self, slot: SlotRef, card: &mut CardInstance, state: MatchState) -> bool {
        match self.place(slot, card, state) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("placement into {} rejected: {}", slot, err);
                false
            }
        }
    }

    /// Detach and return the card in a slot.
    pub fn remove(&mut self, slot: SlotRef) -> Result<InstanceId, SlotError> {
        self.check_range(slot)?;
        self.rows[slot.side][slot.index]
            .take()
            .ok_or(SlotError::SlotEmpty {
                side: slot.side,
                index: slot.index,
            })
    }

    /// First empty slot on a side, lowest index first.
    #[must_use]
    pub fn find_empty(&self, side: Side) -> Option<SlotRef> {
        self.rows[side]
            .iter()
            .position(Option::is_none)
            .map(|index| SlotRef::new(side, index))
    }

    /// Slot holding a card, searching both sides.
    #[must_use]
    pub fn find_card(&self, card: InstanceId) -> Option<SlotRef> {
        Side::all().find_map(|side| {
            self.rows[side]
                .iter()
                .position(|slot| *slot == Some(card))
                .map(|index| SlotRef::new(side, index))
        })
    }

    /// Occupied slots of one side in index order.
    pub fn occupied(&self, side: Side) -> impl Iterator<Item = (SlotRef, InstanceId)> + '_ {
        self.rows[side]
            .iter()
            .enumerate()
            .filter_map(move |(index, slot)| slot.map(|id| (SlotRef::new(side, index), id)))
    }

    /// Raw slot row of one side.
    #[must_use]
    pub fn row(&self, side: Side) -> &[Option<InstanceId>] {
        &self.rows[side]
    }

    /// Empty every slot, returning the detached cards.
    pub fn clear(&mut self) -> Vec<InstanceId> {
        let mut detached = Vec::new();
        for side in Side::all() {
            detached.extend(self.rows[side].iter_mut().filter_map(Option::take));
        }
        detached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId};

    fn hand_card(id: u32, side: Side) -> CardInstance {
        let mut card = CardInstance::unbound(InstanceId(id));
        card.initialize(CardDefinition::new(CardId::new(1), "Archer", 4, 4), side);
        card.move_to(CardLocation::Hand).unwrap();
        card
    }

    #[test]
    fn test_place_from_hand_during_own_turn() {
        let mut grid = SlotGrid::new(3);
        let mut card = hand_card(0, Side::Player);
        card.set_can_attack(false);

        let slot = SlotRef::new(Side::Player, 1);
        assert!(grid.try_place(slot, &mut card, MatchState::PlayerTurn));

        assert_eq!(grid.occupant(slot), Some(InstanceId(0)));
        assert_eq!(card.location(), Some(CardLocation::Battlefield));
        assert!(card.can_attack_this_turn());
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut grid = SlotGrid::new(2);
        let mut first = hand_card(0, Side::Player);
        let slot = SlotRef::new(Side::Player, 0);
        grid.place(slot, &mut first, MatchState::PlayerTurn).unwrap();

        let mut card = hand_card(1, Side::Player);
        assert_eq!(
            grid.place(slot, &mut card, MatchState::PlayerTurn),
            Err(PlacementError::SlotOccupied { side: Side::Player, index: 0 })
        );

        let enemy_slot = SlotRef::new(Side::Enemy, 0);
        assert_eq!(
            grid.place(enemy_slot, &mut card, MatchState::PlayerTurn),
            Err(PlacementError::SideMismatch { slot_side: Side::Enemy, card_side: Side::Player })
        );

        let free = SlotRef::new(Side::Player, 1);
        assert_eq!(
            grid.place(free, &mut card, MatchState::BattlePhase),
            Err(PlacementError::BattleInProgress)
        );
        assert_eq!(
            grid.place(free, &mut card, MatchState::EnemyTurn),
            Err(PlacementError::WrongPhase { side: Side::Player, state: MatchState::EnemyTurn })
        );
        assert!(matches!(
            grid.place(SlotRef::new(Side::Player, 5), &mut card, MatchState::PlayerTurn),
            Err(PlacementError::Slot(SlotError::OutOfRange { .. }))
        ));

        assert!(grid.is_empty(free));
        assert_eq!(card.location(), Some(CardLocation::Hand));
    }

    #[test]
    fn test_card_must_be_in_hand() {
        let mut grid = SlotGrid::new(2);
        let mut card = CardInstance::unbound(InstanceId(0));
        card.initialize(CardDefinition::new(CardId::new(1), "Archer", 4, 4), Side::Player);

        let slot = SlotRef::new(Side::Player, 0);
        assert_eq!(
            grid.check_accept(slot, &card, MatchState::PlayerTurn),
            Err(PlacementError::NotInHand(Some(CardLocation::Deck)))
        );

        card.move_to(CardLocation::Hand).unwrap();
        grid.place(slot, &mut card, MatchState::PlayerTurn).unwrap();

        // Already on the battlefield: cannot be placed again elsewhere.
        let other = SlotRef::new(Side::Player, 1);
        assert_eq!(
            grid.check_accept(other, &card, MatchState::PlayerTurn),
            Err(PlacementError::NotInHand(Some(CardLocation::Battlefield)))
        );
    }

    #[test]
    fn test_enemy_places_on_enemy_turn() {
        let mut grid = SlotGrid::new(2);
        let mut card = hand_card(4, Side::Enemy);
        let slot = SlotRef::new(Side::Enemy, 0);

        assert!(!grid.can_accept(slot, &card, MatchState::PlayerTurn));
        assert!(grid.try_place(slot, &mut card, MatchState::EnemyTurn));
    }

    #[test]
    fn test_remove() {
        let mut grid = SlotGrid::new(2);
        let mut card = hand_card(0, Side::Player);
        let slot = SlotRef::new(Side::Player, 0);
        grid.place(slot, &mut card, MatchState::PlayerTurn).unwrap();

        assert_eq!(grid.require_occupant(slot), Ok(InstanceId(0)));
        assert_eq!(grid.remove(slot), Ok(InstanceId(0)));
        assert!(matches!(
            grid.require_occupant(SlotRef::new(Side::Player, 9)),
            Err(SlotError::OutOfRange { count: 2, .. })
        ));
        assert_eq!(
            grid.remove(slot),
            Err(SlotError::SlotEmpty { side: Side::Player, index: 0 })
        );
        assert!(grid.is_empty(slot));
    }

    #[test]
    fn test_find_empty_lowest_index() {
        let mut grid = SlotGrid::new(3);
        assert_eq!(grid.find_empty(Side::Enemy), Some(SlotRef::new(Side::Enemy, 0)));

        let mut a = hand_card(0, Side::Player);
        let mut b = hand_card(1, Side::Player);
        grid.place(SlotRef::new(Side::Player, 0), &mut a, MatchState::PlayerTurn).unwrap();
        grid.place(SlotRef::new(Side::Player, 2), &mut b, MatchState::PlayerTurn).unwrap();

        assert_eq!(grid.find_empty(Side::Player), Some(SlotRef::new(Side::Player, 1)));

        let mut c = hand_card(2, Side::Player);
        grid.place(SlotRef::new(Side::Player, 1), &mut c, MatchState::PlayerTurn).unwrap();
        assert_eq!(grid.find_empty(Side::Player), None);
    }

    #[test]
    fn test_find_card_and_occupied() {
        let mut grid = SlotGrid::new(3);
        let mut a = hand_card(7, Side::Enemy);
        grid.place(SlotRef::new(Side::Enemy, 2), &mut a, MatchState::EnemyTurn).unwrap();

        assert_eq!(grid.find_card(InstanceId(7)), Some(SlotRef::new(Side::Enemy, 2)));
        assert_eq!(grid.find_card(InstanceId(8)), None);

        let occupied: Vec<_> = grid.occupied(Side::Enemy).collect();
        assert_eq!(occupied, vec![(SlotRef::new(Side::Enemy, 2), InstanceId(7))]);
        assert_eq!(grid.occupied(Side::Player).count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut grid = SlotGrid::new(2);
        let mut a = hand_card(0, Side::Player);
        let mut b = hand_card(1, Side::Enemy);
        grid.place(SlotRef::new(Side::Player, 1), &mut a, MatchState::PlayerTurn).unwrap();
        grid.place(SlotRef::new(Side::Enemy, 0), &mut b, MatchState::EnemyTurn).unwrap();

        let detached = grid.clear();
        assert_eq!(detached, vec![InstanceId(0), InstanceId(1)]);
        assert_eq!(grid.find_empty(Side::Player), Some(SlotRef::new(Side::Player, 0)));
        assert_eq!(grid.occupied(Side::Enemy).count(), 0);
    }

    #[test]
    fn test_opposing_slot() {
        let slot = SlotRef::new(Side::Player, 4);
        assert_eq!(slot.opposing(), SlotRef::new(Side::Enemy, 4));
        assert_eq!(slot.to_string(), "Player slot 4");
    }
}
