//! Match orchestration.
//!
//! ## Key Types
//!
//! - `MatchController`: State machine, intents, step queue, turn timer
//! - `Combat`: Two sub-phase battle resolution with mutual exchanges
//! - `PhaseStep`: One paced step of an automatic sequence
//! - `MatchSnapshot`: Serializable view for the presentation layer

pub mod combat;
pub mod controller;
pub mod pipeline;
pub mod view;

pub use combat::{designated_target, AttackTarget, Combat, SubPhaseOutcome, TargetMap};
pub use controller::MatchController;
pub use pipeline::PhaseStep;
pub use view::{CardView, MatchSnapshot, SideView};
