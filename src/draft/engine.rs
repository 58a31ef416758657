//! Draft engine.
//!
//! Drafting takes every rune of one type from a single source. When the
//! source is a runeforge its other runes drop into the center pool. The
//! selection stays "in flight" until it is committed to a line or the floor,
//! and until then it can be cancelled, restoring both pools exactly.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::pools::{partition_by_type, CenterPool, Runeforge};
use crate::core::{EngineError, PlayerId, RuneforgeId, SelectionError};
use crate::runes::{Rune, RuneType};

/// Where a draft is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    Runeforge(RuneforgeId),
    Center,
}

/// Record of the in-flight selection's origin, for cancellation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftSource {
    Runeforge {
        runeforge_id: RuneforgeId,
        original_runes: Vector<Rune>,
        /// Center length before the remainder was appended.
        center_len_before: usize,
    },
    Center {
        original_runes: Vector<Rune>,
    },
}

/// Drafting state for one game: pools plus the in-flight selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftBoard {
    pub runeforges: Vec<Runeforge>,
    pub center: CenterPool,
    pub draft_source: Option<DraftSource>,
    pub selected_runes: Vec<Rune>,
}

/// Result of a successful draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftResult {
    pub selected_runes: Vec<Rune>,
    /// Runes moved from the runeforge to the center.
    pub moved_to_center: usize,
}

impl DraftBoard {
    /// A board with `count` empty runeforges owned by `owner`.
    #[must_use]
    pub fn new(count: usize, capacity: usize, owner: PlayerId) -> Self {
        Self {
            runeforges: (0..count)
                .map(|i| Runeforge::new(RuneforgeId(i as u8), owner, capacity))
                .collect(),
            ..Self::default()
        }
    }

    /// Whether a selection is in flight.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.draft_source.is_some()
    }

    /// Every runeforge and the center are empty.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.center.is_empty() && self.runeforges.iter().all(|f| f.runes.is_empty())
    }

    /// Look up a runeforge.
    #[must_use]
    pub fn runeforge(&self, id: RuneforgeId) -> Option<&Runeforge> {
        self.runeforges.get(id.index())
    }

    /// Rune types currently draftable from `source`.
    #[must_use]
    pub fn available_types(&self, source: SourceId) -> Vec<RuneType> {
        let runes: Box<dyn Iterator<Item = &Rune>> = match source {
            SourceId::Runeforge(id) => match self.runeforge(id) {
                Some(forge) if !forge.disabled => Box::new(forge.runes.iter()),
                _ => return Vec::new(),
            },
            SourceId::Center => Box::new(self.center.runes.iter()),
        };
        let mut types: Vec<RuneType> = runes.map(|r| r.rune_type).collect();
        types.sort();
        types.dedup();
        types
    }
}

/// Check the center pool may be drafted by `drafter`.
///
/// Fails with `SourceUnavailable` naming the first runeforge the drafter
/// can still draft from.
pub fn can_draft_from_center(board: &DraftBoard, drafter: PlayerId) -> Result<(), EngineError> {
    match board
        .runeforges
        .iter()
        .find(|f| f.owner_id == drafter && f.is_accessible())
    {
        Some(forge) => Err(EngineError::SourceUnavailable { accessible: forge.id }),
        None => Ok(()),
    }
}

/// Draft every rune of `rune_type` from `source`.
///
/// On failure the board is unchanged.
pub fn draft_from_source(
    board: &mut DraftBoard,
    drafter: PlayerId,
    source: SourceId,
    rune_type: RuneType,
) -> Result<DraftResult, EngineError> {
    if board.has_selection() {
        return Err(SelectionError::SelectionInFlight.into());
    }

    match source {
        SourceId::Runeforge(id) => {
            let center_len_before = board.center.len();
            let forge = board
                .runeforges
                .get_mut(id.index())
                .ok_or(SelectionError::UnknownRuneforge(id))?;
            if forge.disabled {
                return Err(SelectionError::SourceDisabled.into());
            }
            if forge.runes.is_empty() {
                return Err(SelectionError::SourceEmpty.into());
            }
            if !forge.contains_type(rune_type) {
                return Err(SelectionError::TypeNotInSource.into());
            }

            let original_runes = forge.runes.clone();
            let (selected, remainder) = partition_by_type(&forge.runes, rune_type);
            forge.runes = Vector::new();

            let moved_to_center = remainder.len();
            board.center.runes.append(remainder);
            board.selected_runes = selected.clone();
            board.draft_source = Some(DraftSource::Runeforge {
                runeforge_id: id,
                original_runes,
                center_len_before,
            });

            tracing::debug!(runeforge = %id, ?rune_type, picked = selected.len(), moved_to_center, "drafted from runeforge");
            Ok(DraftResult {
                selected_runes: selected,
                moved_to_center,
            })
        }
        SourceId::Center => {
            can_draft_from_center(board, drafter)?;
            if board.center.is_empty() {
                return Err(SelectionError::SourceEmpty.into());
            }
            if !board.center.contains_type(rune_type) {
                return Err(SelectionError::TypeNotInSource.into());
            }

            let original_runes = board.center.runes.clone();
            let (selected, rest) = partition_by_type(&board.center.runes, rune_type);
            board.center.runes = rest;
            board.selected_runes = selected.clone();
            board.draft_source = Some(DraftSource::Center { original_runes });

            tracing::debug!(?rune_type, picked = selected.len(), "drafted from center");
            Ok(DraftResult {
                selected_runes: selected,
                moved_to_center: 0,
            })
        }
    }
}

/// Undo the in-flight selection, restoring the source and center.
///
/// Returns `false` (and does nothing) when nothing is selected.
pub fn cancel_selection(board: &mut DraftBoard) -> bool {
    let Some(source) = board.draft_source.take() else {
        return false;
    };

    match source {
        DraftSource::Runeforge {
            runeforge_id,
            original_runes,
            center_len_before,
        } => {
            board.center.runes.truncate(center_len_before);
            if let Some(forge) = board.runeforges.get_mut(runeforge_id.index()) {
                forge.runes = original_runes;
            }
        }
        DraftSource::Center { original_runes } => {
            board.center.runes = original_runes;
        }
    }
    board.selected_runes.clear();
    tracing::debug!("selection cancelled");
    true
}

/// Take the in-flight selection for placement, ending cancellability.
pub fn commit_selection(board: &mut DraftBoard) -> Result<Vec<Rune>, EngineError> {
    if board.draft_source.take().is_none() {
        return Err(SelectionError::NothingSelected.into());
    }
    Ok(std::mem::take(&mut board.selected_runes))
}
