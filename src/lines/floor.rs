//! The floor line.

use serde::{Deserialize, Serialize};

use crate::runes::Rune;

/// Penalty buffer for runes that did not fit on a line.
///
/// Anything past `max_capacity` overloads instead of landing here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorLine {
    pub max_capacity: usize,
    pub runes: Vec<Rune>,
}

impl FloorLine {
    #[must_use]
    pub fn new(max_capacity: usize) -> Self {
        Self {
            max_capacity,
            runes: Vec::with_capacity(max_capacity),
        }
    }

    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.max_capacity.saturating_sub(self.runes.len())
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    /// Empty the floor, returning what was on it.
    pub fn clear(&mut self) -> Vec<Rune> {
        std::mem::take(&mut self.runes)
    }
}
