//! Solo actions.
//!
//! Every state transition the session exposes is also a `SoloAction`
//! value. The rules engine enumerates and applies them, and the run keeps
//! a history of applied actions for replay and debugging.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::RuneId;
use crate::draft::SourceId;
use crate::runes::RuneType;

/// A player action during a solo run.
///
/// ## Example
///
/// ```
/// use rune_wall::core::SoloAction;
/// use rune_wall::draft::SourceId;
/// use rune_wall::runes::RuneType;
///
/// let draft = SoloAction::Draft { source: SourceId::Center, rune_type: RuneType::Fire };
/// assert!(draft.is_draft_phase());
/// assert!(!SoloAction::AdvanceToNextGame.is_draft_phase());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoloAction {
    /// Take every rune of one type from a source.
    Draft { source: SourceId, rune_type: RuneType },

    /// Undo the in-flight selection.
    CancelSelection,

    /// Commit the selection to a pattern line.
    PlaceOnLine { line_index: usize },

    /// Commit the selection straight to the floor.
    PlaceInFloor,

    /// Resolve a full pattern line onto the wall.
    CompleteLine { line_index: usize },

    /// Take runes from the deck-building offer.
    PickDraftRunes { rune_ids: SmallVec<[RuneId; 3]> },

    /// Turn a deck rune into arcane dust between games.
    Disenchant { rune_id: RuneId },

    /// Start the next game after a victory.
    AdvanceToNextGame,
}

impl SoloAction {
    /// Actions taken while drafting and placing within a round.
    #[must_use]
    pub fn is_draft_phase(&self) -> bool {
        matches!(
            self,
            Self::Draft { .. }
                | Self::CancelSelection
                | Self::PlaceOnLine { .. }
                | Self::PlaceInFloor
                | Self::CompleteLine { .. }
        )
    }
}

/// An applied action with its position in the run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: SoloAction,

    /// Game within the run.
    pub game_index: u32,

    /// Round within the game.
    pub round_index: u32,

    /// Sequence number within the run (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: SoloAction, game_index: u32, round_index: u32, sequence: u32) -> Self {
        Self {
            action,
            game_index,
            round_index,
            sequence,
        }
    }
}
