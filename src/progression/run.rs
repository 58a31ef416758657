//! Run lifecycle: games, rounds, placements and terminal outcomes.
//!
//! A run is a sequence of games. Each game deals the deck out in rounds;
//! a round ends when every pool is drafted, nothing is selected, and no
//! pattern line waits for resolution. Winning a game opens a deck-building
//! offer, losing ends the run.
//!
//! Every function here validates before it mutates, so a rejected action
//! leaves `GameState` exactly as it was.

use serde::{Deserialize, Serialize};

use super::deck_draft::generate_offer;
use super::overload::{apply_solo_overload_damage, overload_damage_for_game};
use crate::artefacts::{apply_incoming_modifiers, apply_outgoing_modifiers};
use crate::core::{EngineError, GameState, PlayerStats, RuneScore, SelectionError, WALL_SIZE};
use crate::draft::{
    cancel_selection, commit_selection, deal_runes, draft_from_source, DraftBoard, DraftResult,
    SourceId,
};
use crate::lines::{
    check_line_target, place_selection_in_floor, place_selection_on_line, FloorLine, PatternLine,
    PlacementOutcome,
};
use crate::runes::{Rune, RuneType};
use crate::wall::{resolve_placement, ResolvedSegment, SpellWall};

/// Why a run ended in defeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatReason {
    HealthDepleted,
    DeckExhausted,
}

/// Lifecycle status of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    NotStarted,
    InProgress,
    /// The current game was won; waiting for the next one.
    Victory,
    Defeat { reason: DefeatReason },
}

impl RunStatus {
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Victory | Self::Defeat { .. })
    }
}

/// What happened when a round boundary was checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEnd {
    /// The round is still being played.
    Continues,
    /// A new round was dealt.
    NextRound,
    Victory,
    Defeat(DefeatReason),
}

/// Overload taken from a single placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverloadReport {
    pub runes: usize,
    /// Damage after artefacts, before armor.
    pub damage: u32,
    pub to_health: u32,
    pub score_bonus: u32,
}

/// Result of committing a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementReport {
    pub placement: PlacementOutcome,
    pub overload: OverloadReport,
    pub round_end: RoundEnd,
}

/// Result of resolving a pattern line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineResolution {
    /// The segment after artefact modifiers.
    pub segment: ResolvedSegment,
    pub round_end: RoundEnd,
}

/// Validate the config and deal the first game.
pub fn start_run(state: &mut GameState) -> Result<(), EngineError> {
    state.config.validate()?;
    if state.status != RunStatus::NotStarted {
        return Err(SelectionError::RunNotInProgress.into());
    }
    next_game(state, 0);
    tracing::info!(seed = state.rng.state().seed, "run started");
    Ok(())
}

/// Rebuild the board for `game_index` and deal its first round.
pub fn next_game(state: &mut GameState, game_index: u32) {
    let config = &state.config;
    state.board = DraftBoard::new(config.runeforge_count, config.runeforge_capacity, state.drafter());
    state.pattern_lines = PatternLine::standard_set(WALL_SIZE);
    state.floor = FloorLine::new(config.floor_capacity);
    state.wall = SpellWall::new(WALL_SIZE);
    state.stats = PlayerStats::new(config.max_health, config.starting_armor);
    state.score = RuneScore::new(config.target_score(game_index));
    state.overload_damage = overload_damage_for_game(game_index);

    state.game_index = game_index;
    state.round_index = 0;
    state.offer = None;
    state.status = RunStatus::InProgress;

    state.deck.reset_for_game(&mut state.rng);
    deal_round(state);

    tracing::info!(
        game_index,
        target = state.score.target,
        overload_damage = state.overload_damage,
        "game started"
    );
}

fn deal_round(state: &mut GameState) {
    let drawn = state.deck.draw(state.config.draw_count);
    let leftover = deal_runes(&mut state.board.runeforges, drawn);
    // Only reachable with runeforges disabled; return them to the top.
    state.deck.remaining_runes.extend(leftover.into_iter().rev());
}

/// Take every rune of `rune_type` from `source`.
pub fn draft(state: &mut GameState, source: SourceId, rune_type: RuneType) -> Result<DraftResult, EngineError> {
    state.ensure_in_progress()?;
    if state.pending_line().is_some() {
        return Err(SelectionError::ResolutionPending.into());
    }
    let drafter = state.drafter();
    draft_from_source(&mut state.board, drafter, source, rune_type)
}

/// Undo the in-flight selection. `false` when nothing was selected.
pub fn cancel(state: &mut GameState) -> bool {
    cancel_selection(&mut state.board)
}

/// Commit the selection to pattern line `line_index`.
pub fn place_on_line(state: &mut GameState, line_index: usize) -> Result<PlacementReport, EngineError> {
    state.ensure_in_progress()?;
    if !state.board.has_selection() {
        return Err(SelectionError::NothingSelected.into());
    }
    check_line_target(&state.pattern_lines, &state.wall, line_index, &state.board.selected_runes)?;

    let runes = commit_selection(&mut state.board)?;
    let placement = place_selection_on_line(
        &mut state.pattern_lines,
        &mut state.floor,
        &state.wall,
        line_index,
        runes,
    )?;
    Ok(finish_placement(state, placement))
}

/// Commit the selection straight to the floor.
pub fn place_in_floor(state: &mut GameState) -> Result<PlacementReport, EngineError> {
    state.ensure_in_progress()?;
    let runes = commit_selection(&mut state.board)?;
    let placement = place_selection_in_floor(&mut state.floor, runes)?;
    Ok(finish_placement(state, placement))
}

fn finish_placement(state: &mut GameState, placement: PlacementOutcome) -> PlacementReport {
    tracing::debug!(
        on_line = placement.on_line,
        on_floor = placement.on_floor,
        overloaded = placement.overloaded.len(),
        "selection placed"
    );
    let overload = apply_overload(state, placement.overloaded.clone());
    let round_end = if check_defeat(state) {
        RoundEnd::Defeat(DefeatReason::HealthDepleted)
    } else {
        end_round_if_done(state)
    };
    PlacementReport {
        placement,
        overload,
        round_end,
    }
}

/// Hit the player for overloaded runes. Solo overload resolves at once.
pub fn apply_overload(state: &mut GameState, runes: Vec<Rune>) -> OverloadReport {
    if runes.is_empty() {
        return OverloadReport::default();
    }
    let count = runes.len();
    state.deck.record_overload(runes);

    let incoming = apply_incoming_modifiers(state.overload_damage, &state.artefacts);
    let to_health = apply_solo_overload_damage(&mut state.stats, count, incoming.damage);
    let count_u32 = u32::try_from(count).unwrap_or(u32::MAX);
    let score_bonus = incoming.score_bonus.saturating_mul(count_u32);
    state.score.add(score_bonus);

    tracing::debug!(count, to_health, score_bonus, health = state.stats.current_health, "overload");
    OverloadReport {
        runes: count,
        damage: incoming.damage.saturating_mul(count_u32),
        to_health,
        score_bonus,
    }
}

/// Resolve full pattern line `line_index` onto the wall.
///
/// The line's first rune moves to the wall; the rest are spent. The line
/// then stays locked for the rest of the game, so each row completes at
/// most once per game.
pub fn complete_line(state: &mut GameState, line_index: usize) -> Result<LineResolution, EngineError> {
    state.ensure_in_progress()?;
    let line = state
        .pattern_lines
        .get(line_index)
        .ok_or(SelectionError::UnknownLine(line_index))?;
    if !line.is_complete() {
        return Err(SelectionError::LineNotComplete(line_index).into());
    }
    let rune = *line
        .runes
        .first()
        .ok_or(SelectionError::LineNotComplete(line_index))?;

    let raw = resolve_placement(&mut state.wall, line_index, rune)?;
    let segment = apply_outgoing_modifiers(raw, &state.artefacts);
    if let Some(line) = state.pattern_lines.get_mut(line_index) {
        line.lock();
    }
    apply_segment(state, &segment);

    tracing::debug!(line_index, damage = segment.damage, score = state.score.current, "line resolved");
    let round_end = end_round_if_done(state);
    Ok(LineResolution { segment, round_end })
}

/// Apply a (modified) segment: damage scores, healing and armor land on
/// the player, dust accrues for the profile.
pub fn apply_segment(state: &mut GameState, segment: &ResolvedSegment) {
    state.score.add(segment.damage);
    state.stats.heal(segment.healing);
    state.stats.current_armor = state.stats.current_armor.saturating_add(segment.armor);
    state.arcane_dust_earned = state.arcane_dust_earned.saturating_add(u64::from(segment.arcane_dust));
}

/// Mark the run lost if health is gone.
pub fn check_defeat(state: &mut GameState) -> bool {
    if !state.stats.is_dead() {
        return false;
    }
    defeat(state, DefeatReason::HealthDepleted);
    true
}

fn defeat(state: &mut GameState, reason: DefeatReason) {
    state.status = RunStatus::Defeat { reason };
    tracing::info!(game_index = state.game_index, ?reason, "run lost");
}

/// Close the round if nothing is left to draft or resolve.
///
/// On close: clear the floor, then either win the game, lose to an empty
/// deck, or deal the next round. Line locks survive until `next_game`.
pub fn end_round_if_done(state: &mut GameState) -> RoundEnd {
    if !state.status.is_in_progress()
        || !state.board.is_exhausted()
        || state.board.has_selection()
        || state.pending_line().is_some()
    {
        return RoundEnd::Continues;
    }

    state.floor.clear();

    if state.score.reached_target() {
        state.status = RunStatus::Victory;
        state.offer = Some(generate_offer(state));
        tracing::info!(game_index = state.game_index, score = state.score.current, "game won");
        return RoundEnd::Victory;
    }

    if state.deck.remaining() == 0 {
        defeat(state, DefeatReason::DeckExhausted);
        return RoundEnd::Defeat(DefeatReason::DeckExhausted);
    }

    state.round_index += 1;
    deal_round(state);
    tracing::debug!(round_index = state.round_index, remaining = state.deck.remaining(), "round dealt");
    RoundEnd::NextRound
}
