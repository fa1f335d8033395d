//! Error types for the match engine.
//!
//! Errors fall into four groups:
//! - validation rejections (`PlacementError`, `SlotError`, `MatchError::NotPlayerTurn`),
//!   recovered locally with no state mutation
//! - resource exhaustion (`DrawError`), surfaced for the caller to handle
//! - configuration faults (`ConfigError`, `CatalogError::EmptyCatalog`), fatal at startup
//! - lifecycle and pool misuse (`LifecycleError`, `PoolError`), programming errors

use thiserror::Error;

use super::player::Side;
use super::state::MatchState;
use crate::cards::{CardId, CardLocation};
use crate::core::InstanceId;

/// Card catalog lookup failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("card definition {0} not found")]
    NotFound(CardId),

    #[error("card catalog is empty")]
    EmptyCatalog,

    #[error("card definition {0} already registered")]
    DuplicateId(CardId),
}

/// Card pool misuse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("{0} was never allocated by this pool")]
    UnknownHandle(InstanceId),

    #[error("{0} is already in the free list")]
    AlreadyFree(InstanceId),
}

/// Illegal card location transition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{card} cannot move from {from:?} to {to:?}")]
pub struct LifecycleError {
    pub card: InstanceId,
    pub from: Option<CardLocation>,
    pub to: CardLocation,
}

/// Draw failures. Both are surfaced to the caller, never fatal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("{0} deck is empty")]
    DeckEmpty(Side),

    #[error("{side} hand is full ({size} cards)")]
    HandFull { side: Side, size: usize },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Slot access failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("slot {index} is out of range for {side} (has {count} slots)")]
    OutOfRange { side: Side, index: usize, count: usize },

    #[error("{side} slot {index} is empty")]
    SlotEmpty { side: Side, index: usize },
}

/// Reasons a card cannot be placed into a slot, in evaluation order.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("{0} is not a live card")]
    UnknownCard(InstanceId),

    #[error("{side} slot {index} is occupied")]
    SlotOccupied { side: Side, index: usize },

    #[error("{card_side} card cannot go into a {slot_side} slot")]
    SideMismatch { slot_side: Side, card_side: Side },

    #[error("card is not in hand (location {0:?})")]
    NotInHand(Option<CardLocation>),

    #[error("{side} cannot place cards during {state:?}")]
    WrongPhase { side: Side, state: MatchState },

    #[error("cards cannot be placed during the battle phase")]
    BattleInProgress,

    #[error("no empty {0} slot available")]
    NoEmptySlot(Side),
}

/// Target assignment failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("{side} cannot assign targets during {state:?}")]
    WrongPhase { side: Side, state: MatchState },
}

/// Startup configuration faults. The match must not proceed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("card catalog is empty")]
    EmptyCatalog,

    #[error("starting_health must be positive, got {0}")]
    NonPositiveHealth(i32),

    #[error("slots_per_side must be at least 1")]
    NoSlots,

    #[error("max_hand_size must be at least 1")]
    NoHandSpace,

    #[error("starting hand of {starting} exceeds max hand size {max}")]
    StartingHandTooLarge { starting: usize, max: usize },

    #[error("pool pre-warm of {requested} exceeds the supported maximum {max}")]
    PoolPrewarm { requested: usize, max: usize },
}

/// Errors surfaced by `MatchController` intents.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("no match has been started")]
    NotStarted,

    #[error("the match is over")]
    GameOver,

    #[error("cannot end the turn during {0:?}")]
    NotPlayerTurn(MatchState),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
