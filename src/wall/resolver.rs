//! Wall resolution: placing a completed line's rune and sizing its segment.
//!
//! The placed rune joins every occupied cell reachable through
//! up/down/left/right steps. The diagonal layout never puts two runes of one
//! type side by side, so a segment is the cluster of filled cells around the
//! placement. Its size is the base damage: a rune dropped into an existing
//! cluster always hits harder than an isolated one. Effects of every rune in
//! the segment are then added on top.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{Cell, SpellWall};
use crate::artefacts::ArtefactId;
use crate::core::EngineError;
use crate::runes::{Rune, RuneEffect};

/// One step of a resolution, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStep {
    /// The rune landed on the wall.
    Placed { cell: Cell },
    /// An existing cell joined the segment.
    Joined { cell: Cell, running_size: u32 },
    /// A rune effect in the segment applied.
    Effect { cell: Cell, effect: RuneEffect },
    /// Two or more channel runes shared the segment.
    ChannelSynergy { bonus: u32 },
    /// An artefact modified the outcome.
    Artefact { artefact: ArtefactId },
}

/// Outcome of a single wall placement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSegment {
    pub segment_size: u32,
    pub damage: u32,
    pub healing: u32,
    pub armor: u32,
    pub arcane_dust: u32,
    /// Cells in the segment, breadth-first from the placed cell.
    pub ordered_cells: Vec<Cell>,
    pub resolution_steps: Vec<ResolutionStep>,
    pub channel_synergy_triggered: bool,
}

impl ResolvedSegment {
    /// A bare segment result with no cells or steps.
    #[must_use]
    pub fn with_values(segment_size: u32, damage: u32, healing: u32, armor: u32) -> Self {
        Self {
            segment_size,
            damage,
            healing,
            armor,
            ..Self::default()
        }
    }
}

/// Flood-fill the segment of occupied cells containing `start`.
///
/// Returns flat indices in breadth-first order, `start` first. Empty if
/// `start` itself is empty.
#[must_use]
pub fn connected_segment(wall: &SpellWall, start: Cell) -> Vec<usize> {
    if !wall.is_occupied(start) {
        return Vec::new();
    }

    let start = wall.index(start);
    let mut visited = vec![false; wall.size() * wall.size()];
    let mut queue = VecDeque::from([start]);
    let mut order = Vec::new();
    visited[start] = true;

    while let Some(index) = queue.pop_front() {
        order.push(index);
        for next in wall.neighbors(index) {
            if visited[next] {
                continue;
            }
            if wall.get_index(next).is_some() {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }

    order
}

/// Place `rune` in row `line_index` and resolve the segment it joins.
///
/// The target cell is fixed by the diagonal layout. An occupied target is
/// an upstream invariant break and is reported as `ConsistencyViolation`.
pub fn resolve_placement(
    wall: &mut SpellWall,
    line_index: usize,
    rune: Rune,
) -> Result<ResolvedSegment, EngineError> {
    let cell = wall.cell_for(line_index, rune.rune_type).ok_or_else(|| {
        EngineError::ConsistencyViolation(format!("no wall cell for row {line_index} and {:?}", rune.rune_type))
    })?;

    if wall.is_occupied(cell) {
        tracing::error!(%cell, rune = %rune.id, "wall cell already occupied during resolution");
        return Err(EngineError::ConsistencyViolation(format!("wall cell {cell} already occupied")));
    }
    wall.place(cell, rune)?;

    let segment = connected_segment(wall, cell);
    let mut result = ResolvedSegment {
        segment_size: segment.len() as u32,
        damage: segment.len() as u32,
        ..ResolvedSegment::default()
    };

    for (i, &index) in segment.iter().enumerate() {
        let cell = wall.cell_at(index);
        result.ordered_cells.push(cell);
        result.resolution_steps.push(if i == 0 {
            ResolutionStep::Placed { cell }
        } else {
            ResolutionStep::Joined {
                cell,
                running_size: i as u32 + 1,
            }
        });
    }

    let mut channel_runes = 0u32;
    let mut channel_total = 0u32;
    for &index in &segment {
        let Some(effect) = wall.get_index(index).and_then(|r| r.effect) else {
            continue;
        };
        match effect {
            RuneEffect::Damage(n) => result.damage += n,
            RuneEffect::Healing(n) => result.healing += n,
            RuneEffect::Armor(n) => result.armor += n,
            RuneEffect::ArcaneDust(n) => result.arcane_dust += n,
            RuneEffect::Channel(n) => {
                channel_runes += 1;
                channel_total += n;
            }
        }
        result.resolution_steps.push(ResolutionStep::Effect {
            cell: wall.cell_at(index),
            effect,
        });
    }

    if channel_runes >= 2 {
        result.damage += channel_total;
        result.channel_synergy_triggered = true;
        result.resolution_steps.push(ResolutionStep::ChannelSynergy { bonus: channel_total });
    }

    tracing::debug!(
        %cell,
        segment_size = result.segment_size,
        damage = result.damage,
        "resolved wall placement"
    );

    Ok(result)
}
