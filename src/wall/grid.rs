//! The spell wall grid.
//!
//! An N×N grid stored as a flat vec plus width. Every cell is pre-assigned
//! a rune type by the diagonal rule `type = ALL[(row - col) mod N]`, so each
//! row and each column holds every type exactly once. Cells fill during a
//! game and are never cleared until the next game builds a fresh wall.

use serde::{Deserialize, Serialize};

use crate::core::EngineError;
use crate::runes::{Rune, RuneType};

/// A wall coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Fixed-layout grid of placed runes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellWall {
    size: usize,
    cells: Vec<Option<Rune>>,
}

impl SpellWall {
    /// Create an empty `size`×`size` wall.
    ///
    /// `size` must not exceed the number of rune types; the engine always
    /// uses exactly `RuneType::COUNT`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        debug_assert!(size <= RuneType::COUNT);
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Side length.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Flat index of a cell.
    #[must_use]
    pub const fn index(&self, cell: Cell) -> usize {
        cell.row * self.size + cell.col
    }

    /// Cell at a flat index.
    #[must_use]
    pub const fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.size, index % self.size)
    }

    /// The rune type a cell accepts.
    #[must_use]
    pub fn assigned_type(&self, cell: Cell) -> RuneType {
        let n = self.size;
        RuneType::ALL[(cell.row % n + n - cell.col % n) % n]
    }

    /// The unique cell in `row` that accepts `rune_type`.
    #[must_use]
    pub fn cell_for(&self, row: usize, rune_type: RuneType) -> Option<Cell> {
        let n = self.size;
        if row >= n || rune_type.index() >= n {
            return None;
        }
        Some(Cell::new(row, (row + n - rune_type.index()) % n))
    }

    /// The rune at a cell, if any.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<&Rune> {
        if cell.row >= self.size || cell.col >= self.size {
            return None;
        }
        self.get_index(self.index(cell))
    }

    /// Rune at a flat index.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Rune> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Whether a cell is filled.
    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Whether `row` already holds a rune of `rune_type`.
    #[must_use]
    pub fn row_has_type(&self, row: usize, rune_type: RuneType) -> bool {
        self.cell_for(row, rune_type).is_some_and(|cell| self.is_occupied(cell))
    }

    /// Whether the grid has `size * size` cells and every rune sits on a
    /// cell assigned its type.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.size <= RuneType::COUNT
            && self.cells.len() == self.size * self.size
            && self.cells.iter().enumerate().all(|(index, cell)| {
                cell.as_ref()
                    .map_or(true, |rune| rune.rune_type == self.assigned_type(self.cell_at(index)))
            })
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Put a rune on a cell.
    ///
    /// Fails if the cell is out of range, already filled, or assigned a
    /// different type.
    pub fn place(&mut self, cell: Cell, rune: Rune) -> Result<(), EngineError> {
        if cell.row >= self.size || cell.col >= self.size {
            return Err(EngineError::ConsistencyViolation(format!("wall cell {cell} out of range")));
        }
        if self.assigned_type(cell) != rune.rune_type {
            return Err(EngineError::ConsistencyViolation(format!(
                "wall cell {cell} accepts {:?}, not {:?}",
                self.assigned_type(cell),
                rune.rune_type
            )));
        }
        let index = self.index(cell);
        let Some(slot) = self.cells.get_mut(index) else {
            return Err(EngineError::ConsistencyViolation(format!("wall has no storage for cell {cell}")));
        };
        if slot.is_some() {
            return Err(EngineError::ConsistencyViolation(format!("wall cell {cell} already occupied")));
        }
        *slot = Some(rune);
        Ok(())
    }

    /// Flat indices of the up/down/left/right neighbours of `index`.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> {
        let n = self.size;
        let (row, col) = (index / n, index % n);
        let up = (row > 0).then(|| index - n);
        let down = (row + 1 < n).then(|| index + n);
        let left = (col > 0).then(|| index - 1);
        let right = (col + 1 < n).then(|| index + 1);
        [up, down, left, right].into_iter().flatten()
    }
}
