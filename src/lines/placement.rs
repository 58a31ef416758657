//! Line and overflow placement.
//!
//! Runes go to the pattern line first, spill to the floor, and whatever the
//! floor cannot hold is overload. Every rune of a selection ends up in
//! exactly one of those three places.

use super::floor::FloorLine;
use super::pattern::PatternLine;
use crate::core::{EngineError, SelectionError};
use crate::runes::Rune;
use crate::wall::SpellWall;

/// Runes accepted by a pattern line and the excess, in draft order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineAssignment {
    pub placed: Vec<Rune>,
    pub overflow: Vec<Rune>,
}

/// Runes accepted by the floor and the overload excess.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FloorPlacement {
    pub placed: Vec<Rune>,
    pub overflow: Vec<Rune>,
}

/// Where every rune of a committed selection went.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub on_line: usize,
    pub on_floor: usize,
    pub overloaded: Vec<Rune>,
    /// The target line is now full and waits for resolution.
    pub line_completed: bool,
}

impl PlacementOutcome {
    #[must_use]
    pub fn total(&self) -> usize {
        self.on_line + self.on_floor + self.overloaded.len()
    }
}

/// Check that `line_index` can take runes of the selection's type.
///
/// Read-only, so callers can validate before committing the selection.
pub fn check_line_target(
    lines: &[PatternLine],
    wall: &SpellWall,
    line_index: usize,
    runes: &[Rune],
) -> Result<(), EngineError> {
    let first = runes.first().ok_or(SelectionError::NothingSelected)?;
    let line = lines
        .get(line_index)
        .ok_or(SelectionError::UnknownLine(line_index))?;

    if line.is_locked {
        return Err(SelectionError::LineLocked(line_index).into());
    }
    if line.free_slots() == 0 {
        return Err(SelectionError::LineFull(line_index).into());
    }
    if line.rune_type().is_some_and(|t| t != first.rune_type) {
        return Err(SelectionError::LineTypeMismatch(line_index).into());
    }
    if wall.row_has_type(line_index, first.rune_type) {
        return Err(SelectionError::WallRowHasType(line_index).into());
    }
    Ok(())
}

/// Fill `line` up to capacity, returning the excess.
pub fn assign_to_pattern_line(
    line: &mut PatternLine,
    line_index: usize,
    runes: Vec<Rune>,
) -> Result<LineAssignment, EngineError> {
    let Some(first) = runes.first() else {
        return Err(SelectionError::NothingSelected.into());
    };
    if line.is_locked {
        return Err(SelectionError::LineLocked(line_index).into());
    }
    if line.rune_type().is_some_and(|t| t != first.rune_type) {
        return Err(SelectionError::LineTypeMismatch(line_index).into());
    }

    let take = line.free_slots().min(runes.len());
    let mut placed = runes;
    let overflow = placed.split_off(take);
    line.runes.extend(placed.iter().copied());

    Ok(LineAssignment { placed, overflow })
}

/// Put runes on the floor; runes beyond its free slots are overload.
///
/// A full floor is not an error.
pub fn place_in_floor(floor: &mut FloorLine, runes: Vec<Rune>) -> FloorPlacement {
    let take = floor.free_slots().min(runes.len());
    let mut placed = runes;
    let overflow = placed.split_off(take);
    floor.runes.extend(placed.iter().copied());
    FloorPlacement { placed, overflow }
}

/// Place a committed selection: line first, then floor, then overload.
pub fn place_selection_on_line(
    lines: &mut [PatternLine],
    floor: &mut FloorLine,
    wall: &SpellWall,
    line_index: usize,
    runes: Vec<Rune>,
) -> Result<PlacementOutcome, EngineError> {
    check_line_target(lines, wall, line_index, &runes)?;
    let line = lines
        .get_mut(line_index)
        .ok_or(SelectionError::UnknownLine(line_index))?;

    let assignment = assign_to_pattern_line(line, line_index, runes)?;
    let line_completed = line.is_complete();
    let spill = place_in_floor(floor, assignment.overflow);

    Ok(PlacementOutcome {
        on_line: assignment.placed.len(),
        on_floor: spill.placed.len(),
        overloaded: spill.overflow,
        line_completed,
    })
}

/// Place a committed selection straight onto the floor.
pub fn place_selection_in_floor(floor: &mut FloorLine, runes: Vec<Rune>) -> Result<PlacementOutcome, EngineError> {
    if runes.is_empty() {
        return Err(SelectionError::NothingSelected.into());
    }
    let spill = place_in_floor(floor, runes);
    Ok(PlacementOutcome {
        on_line: 0,
        on_floor: spill.placed.len(),
        overloaded: spill.overflow,
        line_completed: false,
    })
}
