//! Draft rarity odds.
//!
//! Deck-building offers roll their rarity from three percentages that
//! always sum to 100. Common runes are never offered: they only appear in
//! the starting deck.

use serde::{Deserialize, Serialize};

use super::rune::Rarity;
use crate::core::GameRng;

/// Percent chance of each offered rarity. Sums to 100.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RarityChances {
    pub epic: f64,
    pub rare: f64,
    pub uncommon: f64,
}

impl RarityChances {
    /// Build chances from epic and rare percentages; uncommon takes the rest.
    ///
    /// Inputs are clamped so the result is always a valid distribution.
    #[must_use]
    pub fn from_epic_rare(epic: f64, rare: f64) -> Self {
        let epic = epic.clamp(0.0, 100.0);
        let rare = rare.clamp(0.0, 100.0 - epic);
        Self {
            epic,
            rare,
            uncommon: 100.0 - epic - rare,
        }
    }

    /// Baseline odds for offers after winning game `game_index`.
    ///
    /// Better rarities become more likely deeper into a run.
    #[must_use]
    pub fn base_for_game(game_index: u32) -> Self {
        let g = f64::from(game_index);
        Self::from_epic_rare((5.0 + 2.0 * g).min(30.0), (20.0 + 3.0 * g).min(45.0))
    }

    /// Sum of all three chances.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.epic + self.rare + self.uncommon
    }

    /// Roll a rarity.
    pub fn roll(&self, rng: &mut GameRng) -> Rarity {
        match rng.choose_weighted(&[self.uncommon, self.rare, self.epic]) {
            Some(2) => Rarity::Epic,
            Some(1) => Rarity::Rare,
            _ => Rarity::Uncommon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_epic_rare_fills_uncommon() {
        let chances = RarityChances::from_epic_rare(10.0, 30.0);
        assert_eq!(chances.uncommon, 60.0);
        assert_eq!(chances.total(), 100.0);
    }

    #[test]
    fn test_from_epic_rare_clamps_overflow() {
        let chances = RarityChances::from_epic_rare(80.0, 50.0);
        assert_eq!(chances.epic, 80.0);
        assert_eq!(chances.rare, 20.0);
        assert_eq!(chances.uncommon, 0.0);
    }

    #[test]
    fn test_base_odds_grow_and_saturate() {
        let early = RarityChances::base_for_game(0);
        let later = RarityChances::base_for_game(5);
        let late = RarityChances::base_for_game(50);

        assert!(later.epic > early.epic);
        assert!(later.rare > early.rare);
        assert_eq!(late.epic, 30.0);
        assert_eq!(late.rare, 45.0);
        assert!((late.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_roll_certain_epic() {
        let mut rng = GameRng::new(1);
        let chances = RarityChances::from_epic_rare(100.0, 0.0);
        for _ in 0..20 {
            assert_eq!(chances.roll(&mut rng), Rarity::Epic);
        }
    }

    #[test]
    fn test_roll_never_common() {
        let mut rng = GameRng::new(5);
        let chances = RarityChances::base_for_game(2);
        for _ in 0..200 {
            assert_ne!(chances.roll(&mut rng), Rarity::Common);
        }
    }
}
