//! Battlefield zones.
//!
//! Hand, deck and graveyard rosters live on `PlayerState`; the battlefield
//! is the one zone shared between both sides, so it lives here.
//!
//! ## Key Types
//!
//! - `SlotRef`: Side + index address of one slot
//! - `SlotGrid`: Fixed slot rows, placement validation, removal, lookup

pub mod battlefield;

pub use battlefield::{SlotGrid, SlotRef};
