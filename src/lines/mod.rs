//! Pattern lines, the floor line, and the overflow rules between them.

mod floor;
mod pattern;
mod placement;

pub use floor::FloorLine;
pub use pattern::{LineRunes, PatternLine};
pub use placement::{
    assign_to_pattern_line, check_line_target, place_in_floor, place_selection_in_floor,
    place_selection_on_line, FloorPlacement, LineAssignment, PlacementOutcome,
};
