//! Card system: definitions, catalog, instances, and the instance pool.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Immutable card template
//! - `CardCatalog`: Definition library, always returns copies
//! - `CardInstance`: Live card with health, attack flag, location and side
//! - `CardPool`: Arena that recycles instances

pub mod definition;
pub mod catalog;
pub mod instance;
pub mod pool;

pub use definition::{CardDefinition, CardId};
pub use catalog::CardCatalog;
pub use instance::{CardInstance, CardLocation};
pub use pool::CardPool;
