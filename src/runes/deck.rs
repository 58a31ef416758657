//! Per-run rune deck.
//!
//! `all_runes` is the player's collection and survives from game to game.
//! At the start of every game it is copied into `remaining_runes` and
//! shuffled once; rounds then draw fixed-size batches off the top (the end
//! of the vec).

use serde::{Deserialize, Serialize};

use super::rune::{Rune, RuneType};
use crate::core::{GameRng, RuneId, RuneIdAllocator};

/// The player's deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Undrawn runes for the current game (top = end of vec).
    pub remaining_runes: Vec<Rune>,

    /// Every rune the player owns.
    pub all_runes: Vec<Rune>,

    /// Runes lost to overload this game.
    pub overloaded_runes: Vec<Rune>,
}

impl Deck {
    /// Build a fresh deck of `per_type` common runes of every type.
    pub fn starting(ids: &mut RuneIdAllocator, per_type: usize) -> Self {
        let all_runes = RuneType::ALL
            .iter()
            .flat_map(|&rune_type| std::iter::repeat(rune_type).take(per_type))
            .map(|rune_type| Rune::common(ids.alloc(), rune_type))
            .collect();

        Self {
            remaining_runes: Vec::new(),
            all_runes,
            overloaded_runes: Vec::new(),
        }
    }

    /// Refill from the collection and shuffle for a new game.
    pub fn reset_for_game(&mut self, rng: &mut GameRng) {
        self.remaining_runes = self.all_runes.clone();
        rng.shuffle(&mut self.remaining_runes);
        self.overloaded_runes.clear();
    }

    /// Draw up to `count` runes off the top.
    pub fn draw(&mut self, count: usize) -> Vec<Rune> {
        let split = self.remaining_runes.len().saturating_sub(count);
        let mut drawn = self.remaining_runes.split_off(split);
        drawn.reverse();
        drawn
    }

    /// Number of undrawn runes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining_runes.len()
    }

    /// Add a rune to the collection (takes effect from the next game).
    pub fn add_rune(&mut self, rune: Rune) {
        self.all_runes.push(rune);
    }

    /// Remove a rune from the collection.
    pub fn remove_rune(&mut self, id: RuneId) -> Option<Rune> {
        let pos = self.all_runes.iter().position(|r| r.id == id)?;
        Some(self.all_runes.remove(pos))
    }

    /// Record runes destroyed by overload.
    pub fn record_overload(&mut self, runes: impl IntoIterator<Item = Rune>) {
        self.overloaded_runes.extend(runes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starting_deck(per_type: usize) -> Deck {
        let mut ids = RuneIdAllocator::default();
        Deck::starting(&mut ids, per_type)
    }

    #[test]
    fn test_starting_deck_composition() {
        let deck = starting_deck(4);
        assert_eq!(deck.all_runes.len(), 4 * RuneType::COUNT);
        for rune_type in RuneType::ALL {
            let count = deck.all_runes.iter().filter(|r| r.rune_type == rune_type).count();
            assert_eq!(count, 4);
        }
        assert!(deck.remaining_runes.is_empty());
    }

    #[test]
    fn test_reset_for_game_shuffles_collection() {
        let mut deck = starting_deck(4);
        let mut rng = GameRng::new(42);
        deck.reset_for_game(&mut rng);

        assert_eq!(deck.remaining(), deck.all_runes.len());
        assert_ne!(deck.remaining_runes, deck.all_runes);

        let mut shuffled: Vec<_> = deck.remaining_runes.iter().map(|r| r.id).collect();
        shuffled.sort();
        let mut all: Vec<_> = deck.all_runes.iter().map(|r| r.id).collect();
        all.sort();
        assert_eq!(shuffled, all);
    }

    #[test]
    fn test_draw_takes_from_top() {
        let mut deck = starting_deck(1);
        deck.remaining_runes = deck.all_runes.clone();
        let top = *deck.remaining_runes.last().unwrap();

        let drawn = deck.draw(2);
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0], top);
        assert_eq!(deck.remaining(), RuneType::COUNT - 2);
    }

    #[test]
    fn test_draw_past_empty() {
        let mut deck = starting_deck(1);
        deck.remaining_runes = deck.all_runes.clone();

        let drawn = deck.draw(100);
        assert_eq!(drawn.len(), RuneType::COUNT);
        assert!(deck.draw(1).is_empty());
    }

    #[test]
    fn test_add_and_remove_rune() {
        let mut deck = starting_deck(1);
        let id = deck.all_runes[0].id;

        let removed = deck.remove_rune(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(deck.remove_rune(id).is_none());

        deck.add_rune(removed);
        assert_eq!(deck.all_runes.len(), RuneType::COUNT);
    }

    #[test]
    fn test_reset_clears_overloaded() {
        let mut deck = starting_deck(1);
        let rune = deck.all_runes[0];
        deck.record_overload([rune]);
        assert_eq!(deck.overloaded_runes.len(), 1);

        deck.reset_for_game(&mut GameRng::new(0));
        assert!(deck.overloaded_runes.is_empty());
    }
}
