//! Whole-run tests driven through the `RulesEngine` trait.
//!
//! These tests verify:
//! - Random playouts always reach a terminal state
//! - Runs are reproducible from their seed
//! - Overload scaling and armor absorption
//! - Deck building between games

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use rune_wall::progression::{self, DefeatReason, BASE_DRAFT_PICKS, DRAFT_OFFER_SIZE};
use rune_wall::runes::{Rune, RuneType};
use rune_wall::{
    ActionOutcome, ActiveArtefacts, ArtefactId, GameResult, GameState, Rarity, RulesEngine, RuneId, RunStatus,
    SoloAction, SoloGame, SoloGameBuilder,
};

/// Play random legal actions, never cancelling, until the run is lost or
/// `games` games have been won.
fn playout(seed: u64, games: u32, artefacts: ActiveArtefacts) -> (SoloGame, GameState) {
    let (mut game, mut state) = SoloGameBuilder::new().artefacts(artefacts).build(seed).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);

    for _ in 0..20_000 {
        if matches!(state.status, RunStatus::Defeat { .. }) || state.game_index >= games {
            return (game, state);
        }
        let actions: Vec<_> = game
            .legal_actions(&state)
            .into_iter()
            .filter(|a| *a != SoloAction::CancelSelection)
            .collect();
        assert!(!actions.is_empty(), "no legal actions in {:?}", state.status);

        let action = &actions[rng.gen_range(0..actions.len())];
        game.apply_action(&mut state, action).unwrap();
        check_invariants(&state);
    }
    panic!("playout for seed {seed} did not finish");
}

fn check_invariants(state: &GameState) {
    assert!(state.stats.current_health <= state.stats.max_health);
    assert!(state.floor.runes.len() <= state.floor.max_capacity);
    for line in &state.pattern_lines {
        assert!(line.len() <= line.capacity);
        if let Some(t) = line.rune_type() {
            assert!(line.runes.iter().all(|r| r.rune_type == t));
        }
    }
    for row in 0..state.wall.size() {
        for col in 0..state.wall.size() {
            let cell = rune_wall::Cell::new(row, col);
            if let Some(rune) = state.wall.get(cell) {
                assert_eq!(rune.rune_type, state.wall.assigned_type(cell));
            }
        }
    }
}

/// Test random playouts terminate with consistent state.
#[test]
fn test_random_playouts_terminate() {
    for seed in 0..8 {
        let (game, state) = playout(seed, 3, ActiveArtefacts::none());
        assert!(state.game_index >= 3 || game.is_terminal(&state).is_some());
    }
}

/// Test playouts with every artefact pairing stay consistent.
#[test]
fn test_playouts_with_artefacts() {
    for (i, a) in ArtefactId::ALL.iter().enumerate() {
        for b in &ArtefactId::ALL[i + 1..] {
            playout(u64::from(*a as u8) * 31 + *b as u64, 2, ActiveArtefacts::from_ids([*a, *b]));
        }
    }
}

/// Test the same seed replays the same run.
#[test]
fn test_seed_determinism() {
    let (_, a) = playout(77, 2, ActiveArtefacts::none());
    let (_, b) = playout(77, 2, ActiveArtefacts::none());

    assert_eq!(a.action_history, b.action_history);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

/// Test a serialized run resumes and continues identically.
#[test]
fn test_serialized_state_resumes() {
    let (mut game, mut state) = SoloGameBuilder::new().build(5).unwrap();
    for _ in 0..6 {
        let action = game.legal_actions(&state).into_iter().last().unwrap();
        game.apply_action(&mut state, &action).unwrap();
    }

    let json = serde_json::to_string(&state).unwrap();
    let mut restored: GameState = serde_json::from_str(&json).unwrap();
    let mut restored_game = SoloGame::for_state(&restored).unwrap();

    for _ in 0..20 {
        if game.is_terminal(&state).is_some() {
            break;
        }
        let action = game.legal_actions(&state).into_iter().last().unwrap();
        assert_eq!(restored_game.legal_actions(&restored).last(), Some(&action));
        game.apply_action(&mut state, &action).unwrap();
        restored_game.apply_action(&mut restored, &action).unwrap();
    }
    assert_eq!(serde_json::to_string(&state).unwrap(), serde_json::to_string(&restored).unwrap());
}

/// Test overload damage at game 40 uses the capped table value.
#[test]
fn test_overload_at_game_forty() {
    let (_, mut state) = SoloGameBuilder::new().max_health(500).build(1).unwrap();
    progression::next_game(&mut state, 40);
    assert_eq!(state.overload_damage, 100);
    assert_eq!(state.score.target, 20 * 41);

    let report = progression::apply_overload(&mut state, vec![Rune::common(RuneId(9_000), RuneType::Life)]);
    assert_eq!(report.damage, 100);
    assert_eq!(report.to_health, 100);
    assert_eq!(state.stats.current_health, 400);
}

/// Test armor soaks overload before health.
#[test]
fn test_armor_before_health() {
    let (_, mut state) = SoloGameBuilder::new().build(1).unwrap();
    progression::next_game(&mut state, 10);
    assert_eq!(state.overload_damage, 8);
    state.stats.current_armor = 12;

    let runes = vec![
        Rune::common(RuneId(9_000), RuneType::Fire),
        Rune::common(RuneId(9_001), RuneType::Fire),
    ];
    let report = progression::apply_overload(&mut state, runes);
    assert_eq!(report.damage, 16);
    assert_eq!(report.to_health, 4);
    assert_eq!(state.stats.current_armor, 0);
    assert_eq!(state.stats.current_health, 46);
}

/// Test lethal overload ends the run.
#[test]
fn test_lethal_overload_defeats() {
    let (_, mut state) = SoloGameBuilder::new().max_health(1).build(3).unwrap();
    let runes = vec![Rune::common(RuneId(9_000), RuneType::Void)];
    progression::apply_overload(&mut state, runes);

    assert!(progression::check_defeat(&mut state));
    assert_eq!(
        state.status,
        RunStatus::Defeat {
            reason: DefeatReason::HealthDepleted
        }
    );
}

/// Test winning a game, picking from the offer, and moving on.
#[test]
fn test_victory_pick_and_advance() {
    let (mut game, mut state) = SoloGameBuilder::new().base_target_score(1).build(12).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(12);

    while state.status == RunStatus::InProgress {
        let actions: Vec<_> = game
            .legal_actions(&state)
            .into_iter()
            .filter(|a| *a != SoloAction::CancelSelection && *a != SoloAction::PlaceInFloor)
            .collect();
        let first_line = SoloAction::PlaceOnLine { line_index: 0 };
        let action = if actions.is_empty() {
            SoloAction::PlaceInFloor
        } else if actions.contains(&first_line) {
            first_line
        } else {
            actions[rng.gen_range(0..actions.len())].clone()
        };
        game.apply_action(&mut state, &action).unwrap();
    }
    assert_eq!(state.status, RunStatus::Victory);
    assert_eq!(game.is_terminal(&state), Some(GameResult::Victory { game_index: 0 }));

    let offer = state.offer.clone().unwrap();
    assert_eq!(offer.runes.len(), DRAFT_OFFER_SIZE);
    assert_eq!(offer.picks_allowed, BASE_DRAFT_PICKS);
    assert!(offer.runes.iter().all(|r| r.rarity != Rarity::Common));

    let deck_size = state.deck.all_runes.len();
    let pick = SoloAction::PickDraftRunes {
        rune_ids: [offer.runes[0].id].into_iter().collect(),
    };
    let outcome = game.apply_action(&mut state, &pick).unwrap();
    assert_eq!(outcome, ActionOutcome::Picked(vec![offer.runes[0]]));
    assert_eq!(state.deck.all_runes.len(), deck_size + 1);
    assert!(state.offer.is_none());
    let actions = game.legal_actions(&state);
    assert!(!actions.iter().any(|a| matches!(a, SoloAction::PickDraftRunes { .. })));
    assert_eq!(actions.last(), Some(&SoloAction::AdvanceToNextGame));

    let outcome = game.apply_action(&mut state, &SoloAction::AdvanceToNextGame).unwrap();
    assert_eq!(outcome, ActionOutcome::Advanced { game_index: 1 });
    assert_eq!(state.status, RunStatus::InProgress);
    assert_eq!(state.score.current, 0);
    assert_eq!(state.score.target, 2);
    assert_eq!(state.deck.remaining(), deck_size + 1 - state.config.draw_count);
}
