//! Core engine types: handles, sides, state, intents, RNG, configuration, errors.
//!
//! These are the building blocks every other module depends on. Nothing in
//! here knows about cards beyond their identifiers.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use entity::InstanceId;
pub use player::{Side, SideMap};
pub use rng::GameRng;
pub use config::{MatchConfig, Pacing, MAX_POOL_PREWARM};
pub use action::{Intent, IntentRecord};
pub use state::{MatchPhase, MatchState};
pub use error::{
    CatalogError, ConfigError, DrawError, LifecycleError, MatchError, PlacementError,
    PoolError, SlotError, TargetError,
};
