//! Card instance handles.
//!
//! Every live card in a match is addressed by an `InstanceId`. The id is
//! an index into the `CardPool` arena that owns the instance storage, so
//! hands, graveyards and battlefield slots hold plain `Copy` handles and
//! never own instance lifetime.
//!
//! ```
//! use card_duel::core::InstanceId;
//!
//! let id = InstanceId::new(3);
//! assert_eq!(id.index(), 3);
//! assert_eq!(format!("{}", id), "Instance(3)");
//! ```

use serde::{Deserialize, Serialize};

/// Handle to a pooled card instance.
///
/// Handles stay valid for the lifetime of the pool. A released handle may be
/// handed out again by a later `acquire`, bound to a different definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a handle from a raw arena index.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Arena index of this handle.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}
