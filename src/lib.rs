//! # card-duel
//!
//! Match engine for a two-sided slot battle card game.
//!
//! ## Design Principles
//!
//! 1. **Explicit Ownership**: One `MatchController` owns the catalog, pool,
//!    battlefield and both player states. No globals.
//!
//! 2. **Validate, Then Mutate**: Every intent is checked in full before
//!    anything changes. Rejections surface a warning and leave state as is.
//!
//! 3. **Pacing Is Presentation**: Automatic sequences are queued steps.
//!    Delays are hints; running the queue back to back gives the same match.
//!
//! ## Architecture
//!
//! - **Arena Handles**: Card instances live in a recycling `CardPool`;
//!   hands, graveyards and slots hold `InstanceId` handles.
//!
//! - **Listener Seam**: The engine publishes `MatchEvent`s to a
//!   `MatchListener`; it never depends on a UI existing.
//!
//! ## Modules
//!
//! - `core`: Handles, sides, state enum, intents, RNG, configuration, errors
//! - `cards`: Card definitions, catalog, instances and the instance pool
//! - `zones`: Battlefield slot grid
//! - `player`: Per-side health and rosters
//! - `events`: Outbound notifications and listeners
//! - `rules`: Enemy agent seam and match results
//! - `game`: Match controller, combat, phase steps, snapshots

pub mod core;
pub mod cards;
pub mod zones;
pub mod player;
pub mod events;
pub mod rules;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    InstanceId, Side, SideMap,
    GameRng,
    MatchConfig, Pacing,
    Intent, IntentRecord,
    MatchPhase, MatchState,
    MatchError, PlacementError, DrawError, ConfigError,
};

pub use crate::cards::{CardCatalog, CardDefinition, CardId, CardInstance, CardLocation, CardPool};

pub use crate::zones::{SlotGrid, SlotRef};

pub use crate::player::{HealthChange, PlayerState};

pub use crate::events::{EventLog, MatchEvent, MatchListener, NullListener};

pub use crate::rules::{EnemyAgent, EnemyPlay, MatchResult, PassiveEnemy, PlaceholderEnemy};

pub use crate::game::{AttackTarget, MatchController, MatchSnapshot, PhaseStep};
