//! Match rules that sit outside the controller's state machine.
//!
//! - `EnemyAgent`: who decides the enemy's plays
//! - `MatchResult`: how a finished match is reported

pub mod agent;
pub mod outcome;

pub use agent::{EnemyAgent, EnemyPlay, PassiveEnemy, PlaceholderEnemy};
pub use outcome::MatchResult;
