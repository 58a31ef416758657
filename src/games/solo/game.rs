//! Solo run rules.

use smallvec::SmallVec;

use crate::artefacts::ActiveArtefacts;
use crate::core::{EngineError, GameState, RunConfig, SoloAction};
use crate::draft::{can_draft_from_center, SourceId};
use crate::lines::check_line_target;
use crate::progression::{self, RunStatus};
use crate::rules::{ActionOutcome, GameResult, RulesEngine};

/// Rules for a solo run.
#[derive(Clone, Debug)]
pub struct SoloGame {
    config: RunConfig,
}

/// Builder for creating a SoloGame and its first game.
pub struct SoloGameBuilder {
    config: RunConfig,
    artefacts: ActiveArtefacts,
}

impl Default for SoloGameBuilder {
    fn default() -> Self {
        Self {
            config: RunConfig::default(),
            artefacts: ActiveArtefacts::none(),
        }
    }
}

impl SoloGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn runeforges(mut self, count: usize, capacity: usize) -> Self {
        self.config = self.config.with_runeforges(count, capacity);
        self
    }

    pub fn draw_count(mut self, draw_count: usize) -> Self {
        self.config = self.config.with_draw_count(draw_count);
        self
    }

    pub fn max_health(mut self, health: u32) -> Self {
        self.config = self.config.with_max_health(health);
        self
    }

    pub fn base_target_score(mut self, score: u32) -> Self {
        self.config = self.config.with_base_target_score(score);
        self
    }

    pub fn artefacts(mut self, artefacts: ActiveArtefacts) -> Self {
        self.artefacts = artefacts;
        self
    }

    /// Build the rules and a run with its first game dealt.
    pub fn build(self, seed: u64) -> Result<(SoloGame, GameState), EngineError> {
        let mut state = GameState::new(self.config.clone(), self.artefacts, seed);
        progression::start_run(&mut state)?;
        Ok((SoloGame::new(self.config), state))
    }
}

impl SoloGame {
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Rules for an existing run, e.g. one loaded from storage.
    ///
    /// Rejects runs whose config or structure is broken.
    pub fn for_state(state: &GameState) -> Result<Self, EngineError> {
        state.config.validate()?;
        state.check_structure()?;
        Ok(Self::new(state.config.clone()))
    }

    fn legal_drafts(&self, state: &GameState, out: &mut Vec<SoloAction>) {
        for forge in state.board.runeforges.iter().filter(|f| f.is_accessible()) {
            let source = SourceId::Runeforge(forge.id);
            out.extend(
                state
                    .board
                    .available_types(source)
                    .into_iter()
                    .map(|rune_type| SoloAction::Draft { source, rune_type }),
            );
        }
        if can_draft_from_center(&state.board, state.drafter()).is_ok() {
            out.extend(
                state
                    .board
                    .available_types(SourceId::Center)
                    .into_iter()
                    .map(|rune_type| SoloAction::Draft {
                        source: SourceId::Center,
                        rune_type,
                    }),
            );
        }
    }

    fn legal_placements(&self, state: &GameState, out: &mut Vec<SoloAction>) {
        out.push(SoloAction::CancelSelection);
        out.extend(
            (0..state.pattern_lines.len())
                .filter(|&i| {
                    check_line_target(&state.pattern_lines, &state.wall, i, &state.board.selected_runes).is_ok()
                })
                .map(|line_index| SoloAction::PlaceOnLine { line_index }),
        );
        out.push(SoloAction::PlaceInFloor);
    }

    fn legal_deck_building(&self, state: &GameState, out: &mut Vec<SoloAction>) {
        if let Some(offer) = &state.offer {
            // Every non-empty subset of the offer within the pick limit
            let n = offer.runes.len();
            for mask in 1u32..(1 << n) {
                if mask.count_ones() as usize > offer.picks_allowed {
                    continue;
                }
                let rune_ids: SmallVec<[_; 3]> = (0..n)
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| offer.runes[i].id)
                    .collect();
                out.push(SoloAction::PickDraftRunes { rune_ids });
            }
        }
        if state.deck.all_runes.len() > state.config.min_deck_size {
            out.extend(
                state
                    .deck
                    .all_runes
                    .iter()
                    .map(|rune| SoloAction::Disenchant { rune_id: rune.id }),
            );
        }
        out.push(SoloAction::AdvanceToNextGame);
    }
}

impl RulesEngine for SoloGame {
    fn config(&self) -> &RunConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState) -> Vec<SoloAction> {
        let mut actions = Vec::new();
        match state.status {
            RunStatus::InProgress => {
                if state.board.has_selection() {
                    self.legal_placements(state, &mut actions);
                } else if let Some(line_index) = state.pending_line() {
                    actions.push(SoloAction::CompleteLine { line_index });
                } else {
                    self.legal_drafts(state, &mut actions);
                }
            }
            RunStatus::Victory => self.legal_deck_building(state, &mut actions),
            RunStatus::NotStarted | RunStatus::Defeat { .. } => {}
        }
        actions
    }

    fn apply_action(&mut self, state: &mut GameState, action: &SoloAction) -> Result<ActionOutcome, EngineError> {
        let outcome = match action {
            SoloAction::Draft { source, rune_type } => {
                ActionOutcome::Drafted(progression::draft(state, *source, *rune_type)?)
            }
            SoloAction::CancelSelection => ActionOutcome::Cancelled(progression::cancel(state)),
            SoloAction::PlaceOnLine { line_index } => {
                ActionOutcome::Placed(progression::place_on_line(state, *line_index)?)
            }
            SoloAction::PlaceInFloor => ActionOutcome::Placed(progression::place_in_floor(state)?),
            SoloAction::CompleteLine { line_index } => {
                ActionOutcome::Resolved(progression::complete_line(state, *line_index)?)
            }
            SoloAction::PickDraftRunes { rune_ids } => {
                ActionOutcome::Picked(progression::pick_draft_runes(state, rune_ids)?)
            }
            SoloAction::Disenchant { rune_id } => ActionOutcome::Disenchanted {
                dust: progression::disenchant(state, *rune_id)?,
            },
            SoloAction::AdvanceToNextGame => ActionOutcome::Advanced {
                game_index: progression::advance_to_next_game(state)?,
            },
        };

        if outcome != ActionOutcome::Cancelled(false) {
            state.record_action(action.clone());
        }
        Ok(outcome)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        match state.status {
            RunStatus::Victory => Some(GameResult::Victory {
                game_index: state.game_index,
            }),
            RunStatus::Defeat { reason } => Some(GameResult::Defeat {
                game_index: state.game_index,
                reason,
            }),
            RunStatus::NotStarted | RunStatus::InProgress => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artefacts::ArtefactId;
    use crate::core::{SelectionError, WALL_SIZE};

    #[test]
    fn test_game_creation() {
        let (game, state) = SoloGameBuilder::new()
            .runeforges(4, 3)
            .max_health(30)
            .build(42)
            .unwrap();

        assert_eq!(game.config().runeforge_count, 4);
        assert_eq!(state.board.runeforges.len(), 4);
        assert_eq!(state.stats.max_health, 30);
        assert_eq!(state.status, RunStatus::InProgress);
        assert!(game.is_terminal(&state).is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = SoloGameBuilder::new().runeforges(0, 4).build(1);
        assert!(matches!(
            result,
            Err(EngineError::InvalidSelection {
                reason: SelectionError::InvalidConfig(_)
            })
        ));
    }

    #[test]
    fn test_initial_legal_actions_are_drafts() {
        let (game, state) = SoloGameBuilder::new().build(42).unwrap();
        let actions = game.legal_actions(&state);

        assert!(!actions.is_empty());
        assert!(actions.iter().all(|a| matches!(a, SoloAction::Draft { .. })));
        // Center is empty at the start of a round
        assert!(actions
            .iter()
            .all(|a| !matches!(a, SoloAction::Draft { source: SourceId::Center, .. })));
    }

    #[test]
    fn test_selection_offers_placements() {
        let (mut game, mut state) = SoloGameBuilder::new().build(42).unwrap();
        let draft = game.legal_actions(&state)[0].clone();
        game.apply_action(&mut state, &draft).unwrap();

        let actions = game.legal_actions(&state);
        assert!(actions.contains(&SoloAction::CancelSelection));
        assert!(actions.contains(&SoloAction::PlaceInFloor));
        let lines = actions
            .iter()
            .filter(|a| matches!(a, SoloAction::PlaceOnLine { .. }))
            .count();
        assert_eq!(lines, WALL_SIZE);
    }

    #[test]
    fn test_apply_records_history() {
        let (mut game, mut state) = SoloGameBuilder::new().build(42).unwrap();
        let draft = game.legal_actions(&state)[0].clone();

        game.apply_action(&mut state, &draft).unwrap();
        game.apply_action(&mut state, &SoloAction::CancelSelection).unwrap();
        // A no-op cancel is not recorded
        game.apply_action(&mut state, &SoloAction::CancelSelection).unwrap();

        assert_eq!(state.action_history.len(), 2);
        assert_eq!(state.action_history[0].action, draft);
    }

    #[test]
    fn test_rejected_action_is_not_recorded() {
        let (mut game, mut state) = SoloGameBuilder::new().build(42).unwrap();
        let result = game.apply_action(&mut state, &SoloAction::PlaceInFloor);

        assert_eq!(result.unwrap_err(), SelectionError::NothingSelected.into());
        assert!(state.action_history.is_empty());
        assert!(!game.is_legal(&state, &SoloAction::PlaceInFloor));
    }

    #[test]
    fn test_victory_offers_deck_building() {
        let (mut game, mut state) = SoloGameBuilder::new()
            .artefacts(ActiveArtefacts::from_ids([ArtefactId::Robe]))
            .build(42)
            .unwrap();
        state.status = RunStatus::Victory;
        state.offer = Some(progression::generate_offer(&mut state));

        let actions = game.legal_actions(&state);
        let picks = actions
            .iter()
            .filter(|a| matches!(a, SoloAction::PickDraftRunes { .. }))
            .count();
        // 3 singles + 3 pairs with the Robe's second pick
        assert_eq!(picks, 6);
        assert_eq!(actions.last(), Some(&SoloAction::AdvanceToNextGame));
        assert_eq!(game.is_terminal(&state), Some(GameResult::Victory { game_index: 0 }));

        let outcome = game.apply_action(&mut state, &SoloAction::AdvanceToNextGame).unwrap();
        assert_eq!(outcome, ActionOutcome::Advanced { game_index: 1 });
    }

    #[test]
    fn test_disenchant_is_an_action() {
        let (mut game, mut state) = SoloGameBuilder::new().build(42).unwrap();
        let rune_id = state.deck.all_runes[0].id;
        let disenchant = SoloAction::Disenchant { rune_id };

        // Not while a game is being played
        assert!(!game.is_legal(&state, &disenchant));
        assert_eq!(
            game.apply_action(&mut state, &disenchant).unwrap_err(),
            SelectionError::GameNotWon.into()
        );

        state.status = RunStatus::Victory;
        assert!(game.is_legal(&state, &disenchant));
        let outcome = game.apply_action(&mut state, &disenchant).unwrap();

        assert_eq!(outcome, ActionOutcome::Disenchanted { dust: 1 });
        assert_eq!(state.deck.all_runes.len(), 35);
        assert_eq!(state.action_history.last().map(|r| &r.action), Some(&disenchant));
    }

    #[test]
    fn test_disenchant_not_offered_at_min_deck_size() {
        let config = RunConfig::default().with_starting_runes_per_type(2);
        let (game, mut state) = SoloGameBuilder::new().config(config).build(42).unwrap();
        state.status = RunStatus::Victory;

        assert_eq!(state.deck.all_runes.len(), state.config.min_deck_size);
        let actions = game.legal_actions(&state);
        assert!(!actions.iter().any(|a| matches!(a, SoloAction::Disenchant { .. })));
    }
}
