//! Run state.
//!
//! ## GameState
//!
//! The explicit state container for a solo run. It holds everything needed
//! to continue a run after a restart:
//! - Config snapshot, status, game and round indices
//! - Draft board (runeforges, center, in-flight selection)
//! - Pattern lines, floor and spell wall
//! - Player stats, score and the per-game overload damage
//! - Deck, active artefacts and the rune id allocator
//! - Pending deck-building offer and the action history
//! - RNG
//!
//! Per-game containers (board, lines, floor, wall) are rebuilt by
//! `progression::next_game`. Only the deck's collection, artefacts and
//! currency carry across games.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionRecord, SoloAction};
use super::config::{RunConfig, WALL_SIZE};
use super::entity::{PlayerId, RuneIdAllocator};
use super::error::{EngineError, SelectionError};
use super::rng::GameRng;
use crate::artefacts::ActiveArtefacts;
use crate::draft::DraftBoard;
use crate::lines::{FloorLine, PatternLine};
use crate::progression::{DeckDraftOffer, RunStatus};
use crate::runes::Deck;
use crate::wall::SpellWall;

/// Health and armor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub current_health: u32,
    pub max_health: u32,
    pub current_armor: u32,
}

impl PlayerStats {
    #[must_use]
    pub fn new(max_health: u32, armor: u32) -> Self {
        Self {
            current_health: max_health,
            max_health,
            current_armor: armor,
        }
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.current_health == 0
    }

    /// Heal up to `max_health`.
    pub fn heal(&mut self, amount: u32) {
        self.current_health = self.current_health.saturating_add(amount).min(self.max_health);
    }
}

/// Score for the current game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuneScore {
    /// Never decreases within a game.
    pub current: u32,
    pub target: u32,
}

impl RuneScore {
    #[must_use]
    pub fn new(target: u32) -> Self {
        Self { current: 0, target }
    }

    #[must_use]
    pub fn reached_target(&self) -> bool {
        self.current >= self.target
    }

    pub fn add(&mut self, points: u32) {
        self.current = self.current.saturating_add(points);
    }
}

/// Complete state of a solo run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub config: RunConfig,
    pub status: RunStatus,

    /// Game within the run (starts at 0).
    pub game_index: u32,

    /// Round within the game (starts at 0).
    pub round_index: u32,

    pub board: DraftBoard,
    pub pattern_lines: Vec<PatternLine>,
    pub floor: FloorLine,
    pub wall: SpellWall,

    pub stats: PlayerStats,
    pub score: RuneScore,

    /// Base damage per overloaded rune this game.
    pub overload_damage: u32,

    pub deck: Deck,
    pub artefacts: ActiveArtefacts,
    pub ids: RuneIdAllocator,

    /// Arcane dust earned this run, not yet banked in the profile.
    pub arcane_dust_earned: u64,

    /// Deck-building offer open after a victory.
    pub offer: Option<DeckDraftOffer>,

    /// Applied actions, oldest first.
    pub action_history: Vector<ActionRecord>,
    action_sequence: u32,

    pub rng: GameRng,
}

impl GameState {
    /// A run that has not started its first game.
    ///
    /// The starting deck is built here; `progression::next_game` deals
    /// the first game.
    #[must_use]
    pub fn new(config: RunConfig, artefacts: ActiveArtefacts, seed: u64) -> Self {
        let mut ids = RuneIdAllocator::default();
        let deck = Deck::starting(&mut ids, config.starting_runes_per_type);

        Self {
            board: DraftBoard::new(config.runeforge_count, config.runeforge_capacity, PlayerId::SOLO),
            pattern_lines: PatternLine::standard_set(WALL_SIZE),
            floor: FloorLine::new(config.floor_capacity),
            wall: SpellWall::new(WALL_SIZE),
            stats: PlayerStats::new(config.max_health, config.starting_armor),
            score: RuneScore::new(config.target_score(0)),
            overload_damage: 0,
            status: RunStatus::NotStarted,
            game_index: 0,
            round_index: 0,
            deck,
            artefacts,
            ids,
            arcane_dust_earned: 0,
            offer: None,
            action_history: Vector::new(),
            action_sequence: 0,
            rng: GameRng::new(seed),
            config,
        }
    }

    /// The only drafter in a solo run.
    #[must_use]
    pub fn drafter(&self) -> PlayerId {
        PlayerId::SOLO
    }

    /// Fail unless the run is mid-game.
    pub fn ensure_in_progress(&self) -> Result<(), EngineError> {
        if self.status.is_in_progress() {
            Ok(())
        } else {
            Err(SelectionError::RunNotInProgress.into())
        }
    }

    /// Check that a loaded run has the shape the engine relies on.
    ///
    /// Deserialization only proves the JSON matched the types. A run that
    /// fails here is rejected with `ConsistencyViolation` instead of
    /// panicking on its next action.
    pub fn check_structure(&self) -> Result<(), EngineError> {
        let broken = |what: String| Err(EngineError::ConsistencyViolation(format!("malformed run: {what}")));

        if self.wall.size() != WALL_SIZE || !self.wall.is_well_formed() {
            return broken(format!("wall is not a well-formed {WALL_SIZE}x{WALL_SIZE} grid"));
        }

        if self.pattern_lines.len() != WALL_SIZE {
            return broken(format!("{} pattern lines, expected {WALL_SIZE}", self.pattern_lines.len()));
        }
        for (i, line) in self.pattern_lines.iter().enumerate() {
            if line.capacity != i + 1 || line.len() > line.capacity {
                return broken(format!("pattern line {i} has capacity {} and {} runes", line.capacity, line.len()));
            }
            if let Some(t) = line.rune_type() {
                if line.runes.iter().any(|r| r.rune_type != t) {
                    return broken(format!("pattern line {i} mixes rune types"));
                }
            }
        }

        if self.floor.runes.len() > self.floor.max_capacity {
            return broken(format!("floor holds {} runes over capacity {}", self.floor.runes.len(), self.floor.max_capacity));
        }

        let forges = &self.board.runeforges;
        if forges.len() != self.config.runeforge_count {
            return broken(format!("{} runeforges, expected {}", forges.len(), self.config.runeforge_count));
        }
        if let Some((i, _)) = forges.iter().enumerate().find(|(i, f)| f.id.index() != *i) {
            return broken(format!("runeforge {i} has a mismatched id"));
        }
        if self.board.has_selection() == self.board.selected_runes.is_empty() {
            return broken("selection and draft source disagree".to_owned());
        }

        if self.offer.is_some() && self.status != RunStatus::Victory {
            return broken("deck-building offer open outside a victory".to_owned());
        }
        Ok(())
    }

    /// Index of a full pattern line waiting for `complete_line`.
    #[must_use]
    pub fn pending_line(&self) -> Option<usize> {
        self.pattern_lines.iter().position(PatternLine::is_complete)
    }

    /// Victory or defeat.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Append an applied action to the history.
    pub fn record_action(&mut self, action: SoloAction) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.action_history
            .push_back(ActionRecord::new(action, self.game_index, self.round_index, sequence));
    }

    /// Runes still in play this game: deck, pools, selection, lines, floor.
    #[must_use]
    pub fn runes_in_play(&self) -> usize {
        self.deck.remaining()
            + self.board.center.len()
            + self.board.runeforges.iter().map(|f| f.runes.len()).sum::<usize>()
            + self.board.selected_runes.len()
            + self.pattern_lines.iter().map(PatternLine::len).sum::<usize>()
            + self.floor.runes.len()
    }
}
