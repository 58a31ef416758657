//! Pattern lines.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::WALL_SIZE;
use crate::runes::{Rune, RuneType};

/// Inline storage sized for the longest pattern line.
pub type LineRunes = SmallVec<[Rune; WALL_SIZE]>;

/// A capacity-limited staging line feeding one wall row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternLine {
    pub capacity: usize,
    pub runes: LineRunes,
    /// Set after the line resolves; cleared when the next game starts.
    pub is_locked: bool,
}

impl PatternLine {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            runes: SmallVec::new(),
            is_locked: false,
        }
    }

    /// One line per capacity `1..=size`.
    #[must_use]
    pub fn standard_set(size: usize) -> Vec<Self> {
        (1..=size).map(Self::new).collect()
    }

    /// Committed type, if any rune is on the line.
    #[must_use]
    pub fn rune_type(&self) -> Option<RuneType> {
        self.runes.first().map(|r| r.rune_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.runes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }

    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.runes.len())
    }

    /// Full and waiting for resolution.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.is_locked && self.runes.len() == self.capacity
    }

    /// Reset occupancy and lock after resolution. Returns the line's runes.
    pub fn lock(&mut self) -> LineRunes {
        self.is_locked = true;
        std::mem::take(&mut self.runes)
    }
}
