//! Spell wall and wall resolution.
//!
//! - `SpellWall`: fixed diagonal-layout grid, flat storage
//! - `resolve_placement`: place a completed line's rune and size its segment
//! - `ResolvedSegment` / `ResolutionStep`: resolution output consumed by
//!   the artefact pipeline and run progression

mod grid;
mod resolver;

pub use grid::{Cell, SpellWall};
pub use resolver::{connected_segment, resolve_placement, ResolutionStep, ResolvedSegment};
