//! Combat resolution.
//!
//! A battle is two sub-phases in fixed order: every player slot attacks in
//! index order, then every enemy slot does. A card attacking a card is a
//! mutual exchange: both take the other's attack before either death is
//! processed, and both have spent their combat for the turn. Dead cards are
//! evacuated to the graveyard inside the same exchange.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cards::{CardLocation, CardPool};
use crate::core::{InstanceId, Side, SideMap};
use crate::events::{MatchEvent, MatchListener};
use crate::player::PlayerState;
use crate::zones::{SlotGrid, SlotRef};

/// Explicit target assignments: attacker slot to opposing slot index.
pub type TargetMap = FxHashMap<SlotRef, usize>;

/// What an attacker will hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackTarget {
    /// The occupant of an opposing slot.
    Card(SlotRef),
    /// The opposing player directly.
    Player(Side),
}

/// Result of one sub-phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubPhaseOutcome {
    Continue,
    /// A side hit zero health; remaining attacks are abandoned.
    Decisive { loser: Side },
}

/// Resolve the target of the card in `attacker`.
///
/// An assigned target wins while its slot is occupied; otherwise the card
/// in the opposing lane; otherwise the opposing player.
#[must_use]
pub fn designated_target(grid: &SlotGrid, targets: &TargetMap, attacker: SlotRef) -> AttackTarget {
    let defender = attacker.side.opponent();
    let assigned = targets
        .get(&attacker)
        .map(|index| SlotRef::new(defender, *index))
        .filter(|slot| grid.occupant(*slot).is_some());
    let lane = Some(attacker.opposing()).filter(|slot| grid.occupant(*slot).is_some());

    assigned
        .or(lane)
        .map_or(AttackTarget::Player(defender), AttackTarget::Card)
}

/// Drop every assignment that involves a vacated slot.
pub fn clear_targets_for(targets: &mut TargetMap, vacated: SlotRef) {
    let opponent = vacated.side.opponent();
    targets.retain(|attacker, target| {
        *attacker != vacated && !(attacker.side == opponent && *target == vacated.index)
    });
}

/// Borrowed view of everything combat mutates.
pub struct Combat<'a> {
    pub pool: &'a mut CardPool,
    pub grid: &'a mut SlotGrid,
    pub players: &'a mut SideMap<PlayerState>,
    pub targets: &'a mut TargetMap,
    pub listener: &'a mut dyn MatchListener,
}

impl Combat<'_> {
    /// Run every ready attacker of `side`, lowest slot first.
    pub fn resolve_sub_phase(&mut self, side: Side) -> SubPhaseOutcome {
        for index in 0..self.grid.slot_count() {
            let slot = SlotRef::new(side, index);
            let Some(attacker) = self.grid.occupant(slot) else {
                continue;
            };
            let ready = self
                .pool
                .get(attacker)
                .is_some_and(|card| card.can_attack() && card.is_alive());
            if !ready {
                continue;
            }

            match designated_target(&*self.grid, &*self.targets, slot) {
                AttackTarget::Card(target) => self.exchange(slot, target),
                AttackTarget::Player(defender) => {
                    if let Some(loser) = self.strike_player(attacker, defender) {
                        return SubPhaseOutcome::Decisive { loser };
                    }
                }
            }
        }
        SubPhaseOutcome::Continue
    }

    /// Mutual card-versus-card exchange.
    fn exchange(&mut self, attacker_slot: SlotRef, target_slot: SlotRef) {
        let (Some(a), Some(t)) = (
            self.grid.occupant(attacker_slot),
            self.grid.occupant(target_slot),
        ) else {
            return;
        };
        let Some((attacker, target)) = self.pool.pair_mut(a, t) else {
            log::error!("{} or {} is not a live card", a, t);
            return;
        };

        let (attack, counter) = (attacker.attack(), target.attack());
        target.take_damage(attack);
        attacker.take_damage(counter);
        attacker.set_can_attack(false);
        target.set_can_attack(false);
        log::debug!("{} traded with {}", attacker, target);

        let mut casualties: SmallVec<[SlotRef; 2]> = SmallVec::new();
        if !target.is_alive() {
            casualties.push(target_slot);
        }
        if !attacker.is_alive() {
            casualties.push(attacker_slot);
        }
        for slot in casualties {
            self.bury(slot);
        }
    }

    /// Direct attack on a player. Returns the loser if health hit zero.
    fn strike_player(&mut self, attacker: InstanceId, defender: Side) -> Option<Side> {
        let card = self.pool.get_mut(attacker)?;
        card.set_can_attack(false);
        let damage = card.attack();
        log::debug!("{} attacks {} directly", card, defender);

        let player = &mut self.players[defender];
        let change = player.take_damage(damage)?;
        self.listener.on_event(&MatchEvent::HealthChanged {
            side: defender,
            health: change.health,
            max_health: change.max_health,
        });
        if change.died {
            let text = format!("{} has been defeated", player.name());
            self.listener.on_event(&MatchEvent::info(text));
        }
        (change.health == 0).then_some(defender)
    }

    /// Evacuate a dead card: slot, graveyard, notification, target cleanup.
    pub fn bury(&mut self, slot: SlotRef) {
        let Ok(card_id) = self.grid.remove(slot) else {
            return;
        };
        let mut name = String::from("Unknown Card");
        if let Some(card) = self.pool.get_mut(card_id) {
            name = card.name().to_string();
            if let Err(err) = card.move_to(CardLocation::Graveyard) {
                log::error!("{}", err);
            }
        }
        self.players[slot.side].move_to_graveyard(card_id);
        clear_targets_for(self.targets, slot);

        log::debug!("{} died in {}", name, slot);
        self.listener.on_event(&MatchEvent::CardDied {
            card: card_id,
            side: slot.side,
            name,
        });
    }

    /// Bury anything still on the battlefield with no health left.
    ///
    /// Exchanges evacuate their own dead, so this should find nothing.
    /// Returns the number of stale cards found.
    pub fn evacuate_dead(&mut self) -> usize {
        let stale: Vec<SlotRef> = Side::all()
            .flat_map(|side| self.grid.occupied(side))
            .filter(|(_, id)| self.pool.get(*id).map_or(true, |card| !card.is_alive()))
            .map(|(slot, _)| slot)
            .collect();
        for slot in &stale {
            self.bury(*slot);
        }
        stale.len()
    }
}
