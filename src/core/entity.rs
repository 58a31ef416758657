//! Rune identification.
//!
//! Every rune created during a run gets a unique `RuneId`. IDs are handed
//! out by a monotonically increasing allocator stored in the run state, so
//! a rune keeps its identity as it moves between deck, runeforges, lines
//! and the wall.
//!
//! ```
//! use rune_wall::core::{RuneId, RuneIdAllocator};
//!
//! let mut ids = RuneIdAllocator::default();
//! let a = ids.alloc();
//! let b = ids.alloc();
//! assert_ne!(a, b);
//! assert_eq!(b, RuneId(1));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a rune within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuneId(pub u32);

impl RuneId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for RuneId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RuneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rune({})", self.0)
    }
}

/// Hands out fresh `RuneId`s.
///
/// Serialized with the run so a hydrated run never reuses an ID.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuneIdAllocator {
    next: u32,
}

impl RuneIdAllocator {
    /// Start allocating from `first`.
    #[must_use]
    pub const fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Allocate a new rune ID.
    pub fn alloc(&mut self) -> RuneId {
        let id = RuneId(self.next);
        self.next += 1;
        id
    }

    /// Peek at the next ID without allocating it.
    #[must_use]
    pub const fn peek(&self) -> RuneId {
        RuneId(self.next)
    }
}

/// Identifier for a runeforge within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuneforgeId(pub u8);

impl RuneforgeId {
    /// Position of this runeforge in the game's runeforge list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RuneforgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Runeforge({})", self.0)
    }
}

/// Owner of a runeforge. Solo runs only ever use player 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The only drafter in a solo run.
    pub const SOLO: PlayerId = PlayerId(0);
}
