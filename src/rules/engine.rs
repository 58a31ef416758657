//! Rules engine trait for run implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - What actions are legal
//! - How actions modify state
//! - When the run stops accepting play actions

use crate::core::{EngineError, GameState, RunConfig, SoloAction};
use crate::progression::{DefeatReason, LineResolution, PlacementReport};
use crate::draft::DraftResult;
use crate::runes::Rune;

/// Terminal outcome of the current game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Game won; the run continues after deck building.
    Victory { game_index: u32 },
    /// Run over.
    Defeat { game_index: u32, reason: DefeatReason },
}

impl GameResult {
    #[must_use]
    pub fn is_victory(&self) -> bool {
        matches!(self, GameResult::Victory { .. })
    }
}

/// What applying an action produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Drafted(DraftResult),
    Cancelled(bool),
    Placed(PlacementReport),
    Resolved(LineResolution),
    Picked(Vec<Rune>),
    Disenchanted { dust: u64 },
    Advanced { game_index: u32 },
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty when the run accepts no action
/// - `apply_action`: deterministic; a rejected action leaves state untouched
/// - `is_terminal`: `None` while the game is being played
pub trait RulesEngine {
    /// Get the run configuration.
    fn config(&self) -> &RunConfig;

    /// Enumerate every legal action.
    fn legal_actions(&self, state: &GameState) -> Vec<SoloAction>;

    /// Apply an action to the run state.
    fn apply_action(&mut self, state: &mut GameState, action: &SoloAction) -> Result<ActionOutcome, EngineError>;

    /// Check whether the current game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Whether `action` appears in `legal_actions`.
    fn is_legal(&self, state: &GameState, action: &SoloAction) -> bool {
        self.legal_actions(state).contains(action)
    }

    /// Apply actions in order, stopping at the first rejection.
    fn apply_all(
        &mut self,
        state: &mut GameState,
        actions: &[SoloAction],
    ) -> Result<Vec<ActionOutcome>, EngineError> {
        actions
            .iter()
            .map(|action| self.apply_action(state, action))
            .collect()
    }
}
