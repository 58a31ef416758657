//! Deck building between games.
//!
//! Winning a game opens an offer of freshly rolled runes. The player adds
//! some of them to the deck and moves on. Runes can also be disenchanted
//! out of the deck for arcane dust while no game is being played.

use serde::{Deserialize, Serialize};

use super::run::{next_game, RunStatus};
use crate::artefacts::{draft_picks, draft_rarity_chances};
use crate::core::{EngineError, GameState, RuneId, SelectionError};
use crate::runes::{RarityChances, Rune, RuneType};

/// Runes in a deck-building offer.
pub const DRAFT_OFFER_SIZE: usize = 3;

/// Picks allowed per offer before artefacts.
pub const BASE_DRAFT_PICKS: usize = 1;

/// Runes offered after a victory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckDraftOffer {
    pub runes: Vec<Rune>,
    pub picks_allowed: usize,
    /// Odds the offer was rolled with.
    pub chances: RarityChances,
}

/// Roll an offer for the game just won.
///
/// Rolls from a fork of the run RNG.
pub fn generate_offer(state: &mut GameState) -> DeckDraftOffer {
    let base = RarityChances::base_for_game(state.game_index);
    let chances = draft_rarity_chances(base, &state.artefacts);
    let mut rng = state.rng.fork();

    let runes = (0..DRAFT_OFFER_SIZE)
        .map(|_| {
            let rarity = chances.roll(&mut rng);
            let rune_type = RuneType::ALL[rng.gen_range_usize(0..RuneType::COUNT)];
            Rune::new(state.ids.alloc(), rune_type, rarity)
        })
        .collect();

    DeckDraftOffer {
        runes,
        picks_allowed: draft_picks(BASE_DRAFT_PICKS, &state.artefacts),
        chances,
    }
}

/// Add the chosen offer runes to the deck and close the offer.
///
/// An empty pick declines the offer.
pub fn pick_draft_runes(state: &mut GameState, rune_ids: &[RuneId]) -> Result<Vec<Rune>, EngineError> {
    if state.status != RunStatus::Victory {
        return Err(SelectionError::GameNotWon.into());
    }
    let offer = state.offer.as_ref().ok_or(SelectionError::NoOfferOpen)?;
    if rune_ids.len() > offer.picks_allowed {
        return Err(SelectionError::TooManyPicks {
            picked: rune_ids.len(),
            allowed: offer.picks_allowed,
        }
        .into());
    }

    let mut picked: Vec<Rune> = Vec::with_capacity(rune_ids.len());
    for id in rune_ids {
        let rune = offer
            .runes
            .iter()
            .find(|r| r.id == *id)
            .ok_or(SelectionError::UnknownRune)?;
        if picked.iter().any(|p| p.id == *id) {
            return Err(SelectionError::UnknownRune.into());
        }
        picked.push(*rune);
    }

    for rune in &picked {
        state.deck.add_rune(*rune);
    }
    state.offer = None;
    tracing::debug!(picked = picked.len(), deck = state.deck.all_runes.len(), "offer resolved");
    Ok(picked)
}

/// Start the next game after a victory. Unpicked offers are dropped.
pub fn advance_to_next_game(state: &mut GameState) -> Result<u32, EngineError> {
    if state.status != RunStatus::Victory {
        return Err(SelectionError::GameNotWon.into());
    }
    let game_index = state.game_index + 1;
    next_game(state, game_index);
    Ok(game_index)
}

/// Remove a rune from the deck for arcane dust.
///
/// Only between games, and never below `min_deck_size`.
pub fn disenchant(state: &mut GameState, rune_id: RuneId) -> Result<u64, EngineError> {
    if state.status != RunStatus::Victory {
        return Err(SelectionError::GameNotWon.into());
    }
    let min = state.config.min_deck_size;
    if state.deck.all_runes.len() <= min {
        return Err(SelectionError::DeckTooSmall(min).into());
    }
    let rune = state
        .deck
        .remove_rune(rune_id)
        .ok_or(SelectionError::UnknownRune)?;

    let dust = rune.rarity.disenchant_value();
    state.arcane_dust_earned = state.arcane_dust_earned.saturating_add(dust);
    tracing::debug!(rune = %rune.id, dust, "rune disenchanted");
    Ok(dust)
}
