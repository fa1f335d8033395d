//! Match configuration.
//!
//! `MatchConfig` is the whole configuration surface of a match: health,
//! hand sizes, battlefield width, pool pre-warm size, decks and pacing.
//! It is validated once when the `MatchController` is built; an invalid
//! config never reaches a running match.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::{Side, SideMap};
use crate::cards::CardId;

/// Largest pool pre-warm the engine accepts.
pub const MAX_POOL_PREWARM: usize = 4096;

/// Presentation delays before each pipeline step.
///
/// Delays only pace the presentation layer. The engine never waits on them;
/// a driver may honour `MatchController::next_delay` or ignore it and get the
/// same final state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// Before the opening announcement.
    pub intro: Duration,
    /// Before the starting-hand notice.
    pub deal_notice: Duration,
    /// Enemy "thinking" before it acts.
    pub enemy_think: Duration,
    /// Between the enemy acting and the battle starting.
    pub enemy_act: Duration,
    /// Before the battle phase begins.
    pub battle_start: Duration,
    /// Before each combat sub-phase.
    pub sub_phase: Duration,
    /// Before the battle wraps up.
    pub cleanup: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            intro: Duration::from_secs(1),
            deal_notice: Duration::from_secs(1),
            enemy_think: Duration::from_secs(1),
            enemy_act: Duration::from_secs(1),
            battle_start: Duration::from_secs(1),
            sub_phase: Duration::from_millis(1500),
            cleanup: Duration::from_millis(500),
        }
    }
}

impl Pacing {
    /// All delays collapsed to zero.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            intro: Duration::ZERO,
            deal_notice: Duration::ZERO,
            enemy_think: Duration::ZERO,
            enemy_act: Duration::ZERO,
            battle_start: Duration::ZERO,
            sub_phase: Duration::ZERO,
            cleanup: Duration::ZERO,
        }
    }
}

/// Complete match configuration.
///
/// ## Example
///
/// ```
/// use card_duel::core::{MatchConfig, Pacing};
///
/// let config = MatchConfig::new()
///     .with_starting_health(20)
///     .with_slots_per_side(5)
///     .with_pacing(Pacing::instant());
///
/// assert_eq!(config.starting_health, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Health both sides start with (also their max health).
    pub starting_health: i32,

    /// Cards dealt to each side before the first turn.
    pub starting_hand_size: usize,

    /// Turn-start draws are skipped at this hand size.
    pub max_hand_size: usize,

    /// Battlefield slots per side.
    pub slots_per_side: usize,

    /// Card instances allocated before the first match.
    pub pool_prewarm: usize,

    /// Size of randomly built decks.
    pub deck_size: usize,

    /// Seed for deck building and random catalog picks.
    pub seed: u64,

    /// Explicit decklists, top of deck first. `None` builds a random deck.
    pub decks: SideMap<Option<Vec<CardId>>>,

    /// Display names.
    pub names: SideMap<String>,

    /// Presentation pacing.
    pub pacing: Pacing,

    /// Auto end the player's turn after this much idle time.
    pub turn_time_limit: Option<Duration>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_health: 30,
            starting_hand_size: 3,
            max_hand_size: 7,
            slots_per_side: 10,
            pool_prewarm: 50,
            deck_size: 20,
            seed: 0,
            decks: SideMap::default(),
            names: SideMap::new(|side| side.to_string()),
            pacing: Pacing::default(),
            turn_time_limit: None,
        }
    }
}

impl MatchConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set starting (and max) health for both sides.
    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the maximum hand size.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the number of slots per side.
    #[must_use]
    pub fn with_slots_per_side(mut self, count: usize) -> Self {
        self.slots_per_side = count;
        self
    }

    /// Set the pool pre-warm size.
    #[must_use]
    pub fn with_pool_prewarm(mut self, size: usize) -> Self {
        self.pool_prewarm = size;
        self
    }

    /// Set the random deck size.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use an explicit decklist for one side (top of deck first).
    #[must_use]
    pub fn with_deck(mut self, side: Side, cards: Vec<CardId>) -> Self {
        self.decks[side] = Some(cards);
        self
    }

    /// Set a side's display name.
    #[must_use]
    pub fn with_name(mut self, side: Side, name: impl Into<String>) -> Self {
        self.names[side] = name.into();
        self
    }

    /// Set the presentation pacing.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Enable the player turn timer.
    #[must_use]
    pub fn with_turn_time_limit(mut self, limit: Duration) -> Self {
        self.turn_time_limit = Some(limit);
        self
    }

    /// Check the configuration for startup faults.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_health <= 0 {
            return Err(ConfigError::NonPositiveHealth(self.starting_health));
        }
        if self.slots_per_side == 0 {
            return Err(ConfigError::NoSlots);
        }
        if self.max_hand_size == 0 {
            return Err(ConfigError::NoHandSpace);
        }
        if self.starting_hand_size > self.max_hand_size {
            return Err(ConfigError::StartingHandTooLarge {
                starting: self.starting_hand_size,
                max: self.max_hand_size,
            });
        }
        if self.pool_prewarm > MAX_POOL_PREWARM {
            return Err(ConfigError::PoolPrewarm {
                requested: self.pool_prewarm,
                max: MAX_POOL_PREWARM,
            });
        }
        Ok(())
    }
}
