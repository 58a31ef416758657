//! Solo session: the run plus the persistent profile around it.
//!
//! The session owns the active `GameState` and writes it back to storage
//! after every successful transition. Storage failures are logged and
//! never fail a gameplay action; the in-memory run stays authoritative.

use super::game::{SoloGame, SoloGameBuilder};
use crate::artefacts::{ActiveArtefacts, ArtefactId, MAX_SELECTED_ARTEFACTS};
use crate::core::{EngineError, GameState, RunConfig, RuneId, SelectionError, SoloAction};
use crate::draft::{DraftResult, SourceId};
use crate::persistence::{InMemoryStore, KeyValueStore, ProfileStore};
use crate::progression::{LineResolution, PlacementReport, RunStatus};
use crate::rules::{ActionOutcome, RulesEngine};
use crate::runes::{Rune, RuneType};

/// A player's solo session.
pub struct SoloSession<S: KeyValueStore = InMemoryStore> {
    profile: ProfileStore<S>,
    game: Option<SoloGame>,
    state: Option<GameState>,
}

impl Default for SoloSession<InMemoryStore> {
    fn default() -> Self {
        Self::new(InMemoryStore::new())
    }
}

fn unexpected(outcome: ActionOutcome) -> EngineError {
    EngineError::ConsistencyViolation(format!("unexpected action outcome {outcome:?}"))
}

impl<S: KeyValueStore> SoloSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            profile: ProfileStore::new(store),
            game: None,
            state: None,
        }
    }

    pub fn profile(&self) -> &ProfileStore<S> {
        &self.profile
    }

    /// The active run, if any.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn has_saved_run(&self) -> bool {
        self.profile.has_saved_run()
    }

    // === Runs ===

    /// Start a fresh run with the profile's selected artefacts.
    ///
    /// Replaces any saved run.
    pub fn start_run(&mut self, config: RunConfig, seed: u64) -> Result<&GameState, EngineError> {
        let artefacts = self.active_artefacts();
        let (game, state) = SoloGameBuilder::new()
            .config(config)
            .artefacts(artefacts)
            .build(seed)?;

        tracing::info!(seed, artefacts = ?state.artefacts.ids(), "solo run started");
        self.game = Some(game);
        self.state = Some(state);
        self.persist();
        self.current()
    }

    /// Adopt an existing run state, e.g. one received from elsewhere.
    pub fn hydrate_run(&mut self, saved: GameState) -> Result<&GameState, EngineError> {
        let game = SoloGame::for_state(&saved)?;
        tracing::info!(game_index = saved.game_index, round_index = saved.round_index, "run hydrated");
        self.game = Some(game);
        self.state = Some(saved);
        self.persist();
        self.current()
    }

    /// Resume the run saved in the profile.
    ///
    /// `None` when nothing is saved or the saved run cannot be used.
    pub fn continue_run(&mut self) -> Option<&GameState> {
        let saved = self.profile.saved_run()?;
        match SoloGame::for_state(&saved) {
            Ok(game) => {
                self.game = Some(game);
                self.state = Some(saved);
                self.state.as_ref()
            }
            Err(err) => {
                tracing::warn!(%err, "saved run rejected");
                None
            }
        }
    }

    fn current(&self) -> Result<&GameState, EngineError> {
        self.state
            .as_ref()
            .ok_or_else(|| SelectionError::RunNotInProgress.into())
    }

    fn active_artefacts(&self) -> ActiveArtefacts {
        let owned = self.profile.owned_artefacts();
        ActiveArtefacts::from_ids(
            self.profile
                .selected_artefacts()
                .into_iter()
                .filter(|id| owned.contains(id)),
        )
    }

    // === Play ===

    fn apply(&mut self, action: SoloAction) -> Result<ActionOutcome, EngineError> {
        let (Some(game), Some(state)) = (self.game.as_mut(), self.state.as_mut()) else {
            return Err(SelectionError::RunNotInProgress.into());
        };
        let outcome = game.apply_action(state, &action)?;
        self.persist();
        Ok(outcome)
    }

    pub fn draft(&mut self, source: SourceId, rune_type: RuneType) -> Result<DraftResult, EngineError> {
        match self.apply(SoloAction::Draft { source, rune_type })? {
            ActionOutcome::Drafted(result) => Ok(result),
            other => Err(unexpected(other)),
        }
    }

    /// Undo the in-flight selection. `Ok(false)` when nothing was selected.
    pub fn cancel_selection(&mut self) -> Result<bool, EngineError> {
        match self.apply(SoloAction::CancelSelection)? {
            ActionOutcome::Cancelled(cancelled) => Ok(cancelled),
            other => Err(unexpected(other)),
        }
    }

    pub fn place_on_line(&mut self, line_index: usize) -> Result<PlacementReport, EngineError> {
        match self.apply(SoloAction::PlaceOnLine { line_index })? {
            ActionOutcome::Placed(report) => Ok(report),
            other => Err(unexpected(other)),
        }
    }

    pub fn place_runes_in_floor(&mut self) -> Result<PlacementReport, EngineError> {
        match self.apply(SoloAction::PlaceInFloor)? {
            ActionOutcome::Placed(report) => Ok(report),
            other => Err(unexpected(other)),
        }
    }

    pub fn complete_line(&mut self, line_index: usize) -> Result<LineResolution, EngineError> {
        match self.apply(SoloAction::CompleteLine { line_index })? {
            ActionOutcome::Resolved(resolution) => Ok(resolution),
            other => Err(unexpected(other)),
        }
    }

    pub fn pick_draft_runes(&mut self, rune_ids: &[RuneId]) -> Result<Vec<Rune>, EngineError> {
        let action = SoloAction::PickDraftRunes {
            rune_ids: rune_ids.iter().copied().collect(),
        };
        match self.apply(action)? {
            ActionOutcome::Picked(runes) => Ok(runes),
            other => Err(unexpected(other)),
        }
    }

    pub fn advance_to_next_game(&mut self) -> Result<u32, EngineError> {
        match self.apply(SoloAction::AdvanceToNextGame)? {
            ActionOutcome::Advanced { game_index } => Ok(game_index),
            other => Err(unexpected(other)),
        }
    }

    /// Turn a deck rune into arcane dust between games.
    pub fn disenchant(&mut self, rune_id: RuneId) -> Result<u64, EngineError> {
        match self.apply(SoloAction::Disenchant { rune_id })? {
            ActionOutcome::Disenchanted { dust } => Ok(dust),
            other => Err(unexpected(other)),
        }
    }

    // === Artefacts ===

    /// Buy an artefact with banked dust. Returns the remaining balance.
    pub fn buy_artefact(&mut self, artefact: ArtefactId) -> Result<u64, EngineError> {
        let mut owned = self.profile.owned_artefacts();
        if owned.contains(&artefact) {
            return Err(SelectionError::ArtefactAlreadyOwned(artefact).into());
        }
        let available = self.profile.arcane_dust();
        let cost = artefact.cost();
        if available < cost {
            return Err(EngineError::InsufficientFunds {
                artefact,
                cost,
                available,
            });
        }

        let remaining = available - cost;
        owned.push(artefact);
        self.log_storage(self.profile.set_arcane_dust(remaining), "arcane_dust");
        self.log_storage(self.profile.set_owned_artefacts(&owned), "owned_artefacts");
        tracing::info!(?artefact, cost, remaining, "artefact bought");
        Ok(remaining)
    }

    /// Select an owned artefact for future runs.
    pub fn select_artefact(&mut self, artefact: ArtefactId) -> Result<Vec<ArtefactId>, EngineError> {
        if !self.profile.owned_artefacts().contains(&artefact) {
            return Err(SelectionError::ArtefactNotOwned(artefact).into());
        }
        let mut selected = self.profile.selected_artefacts();
        if selected.contains(&artefact) {
            return Ok(selected);
        }
        if selected.len() >= MAX_SELECTED_ARTEFACTS {
            return Err(SelectionError::ArtefactSelectionFull.into());
        }
        selected.push(artefact);
        self.log_storage(self.profile.set_selected_artefacts(&selected), "selected_artefacts");
        Ok(selected)
    }

    /// Drop an artefact from the selection. Unselected artefacts are a no-op.
    pub fn unselect_artefact(&mut self, artefact: ArtefactId) -> Result<Vec<ArtefactId>, EngineError> {
        let mut selected = self.profile.selected_artefacts();
        let before = selected.len();
        selected.retain(|&id| id != artefact);
        if selected.len() != before {
            self.log_storage(self.profile.set_selected_artefacts(&selected), "selected_artefacts");
        }
        Ok(selected)
    }

    // === Persistence ===

    fn log_storage<T>(&self, result: crate::persistence::Result<T>, key: &str) {
        if let Err(err) = result {
            tracing::error!(key, %err, "profile write failed");
        }
    }

    /// Bank earned dust, update the run record, then save or clear the run.
    fn persist(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let earned = std::mem::take(&mut state.arcane_dust_earned);
        let game_index = state.game_index;
        let defeated = matches!(state.status, RunStatus::Defeat { .. });

        if earned > 0 {
            let banked = self.profile.add_arcane_dust(earned);
            self.log_storage(banked, "arcane_dust");
        }
        self.log_storage(self.profile.record_run_length(game_index), "longest_run");

        let Some(state) = self.state.as_ref() else {
            return;
        };
        if defeated {
            self.log_storage(self.profile.clear_run(), "solo_run_state");
        } else {
            self.log_storage(self.profile.save_run(state), "solo_run_state");
        }
    }
}
