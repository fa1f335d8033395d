//! Inbound intents from the UI/AI collaborator.
//!
//! Everything that can change a match from the outside is an `Intent`.
//! The controller records each one it receives as an `IntentRecord`, so a
//! match can be inspected or replayed after the fact.

use serde::{Deserialize, Serialize};

use super::config::MatchConfig;
use super::entity::InstanceId;
use super::player::Side;

/// A request to the match controller.
///
/// ## Example
///
/// ```
/// use card_duel::core::{Intent, InstanceId, Side};
///
/// let place = Intent::RequestPlace {
///     side: Side::Player,
///     slot_index: 0,
///     card: InstanceId::new(4),
/// };
/// assert_eq!(place.side(), Some(Side::Player));
/// assert_eq!(Intent::EndPlayerTurn.side(), Some(Side::Player));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Start (or restart) a match, optionally replacing the configuration.
    StartMatch(Option<Box<MatchConfig>>),

    /// The player is done placing cards.
    EndPlayerTurn,

    /// Place a hand card into a specific slot (drag and drop).
    RequestPlace {
        side: Side,
        slot_index: usize,
        card: InstanceId,
    },

    /// Place a hand card into the first empty slot (double click).
    RequestAutoPlace { side: Side, card: InstanceId },

    /// Point a battlefield card at a specific opposing slot.
    AssignTarget {
        side: Side,
        attacker_slot: usize,
        target_slot: usize,
    },

    /// Administrative end of the match.
    ForceEndGame { player_won: bool },
}

impl Intent {
    /// The side this intent acts for, if it is side-specific.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        match self {
            Intent::EndPlayerTurn => Some(Side::Player),
            Intent::RequestPlace { side, .. }
            | Intent::RequestAutoPlace { side, .. }
            | Intent::AssignTarget { side, .. } => Some(*side),
            Intent::StartMatch(_) | Intent::ForceEndGame { .. } => None,
        }
    }
}

/// A recorded intent with its outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// The intent received.
    pub intent: Intent,

    /// Turn number when it was received.
    pub turn: u32,

    /// Sequence number across the match (for ordering).
    pub sequence: u32,

    /// Whether the controller accepted it.
    pub accepted: bool,
}

impl IntentRecord {
    /// Create a new intent record.
    #[must_use]
    pub fn new(intent: Intent, turn: u32, sequence: u32, accepted: bool) -> Self {
        Self {
            intent,
            turn,
            sequence,
            accepted,
        }
    }
}
