//! Run configuration.
//!
//! A solo run is configured once at `start_run` and the config is stored
//! with the run, so a hydrated run keeps playing by the rules it started
//! with. The wall geometry is not configurable: it is always one row and
//! one column per rune type.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, SelectionError};
use crate::runes::RuneType;

/// Side length of the spell wall (and number of pattern lines).
pub const WALL_SIZE: usize = RuneType::COUNT;

/// Solo run configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of runeforges dealt each round.
    pub runeforge_count: usize,

    /// Maximum runes per runeforge.
    pub runeforge_capacity: usize,

    /// Runes drawn from the deck at the start of every round.
    /// Dealt round-robin across runeforges.
    pub draw_count: usize,

    /// Floor line slots before overflow turns into overload.
    pub floor_capacity: usize,

    /// Starting (and maximum) health.
    pub max_health: u32,

    /// Armor at the start of every game.
    pub starting_armor: u32,

    /// Score target for game 0; game `n` needs `base_target_score * (n + 1)`.
    pub base_target_score: u32,

    /// Common runes of each type in a fresh deck.
    pub starting_runes_per_type: usize,

    /// Disenchanting never shrinks the deck below this.
    pub min_deck_size: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            runeforge_count: 3,
            runeforge_capacity: 4,
            draw_count: 12,
            floor_capacity: 7,
            max_health: 50,
            starting_armor: 0,
            base_target_score: 20,
            starting_runes_per_type: 6,
            min_deck_size: 12,
        }
    }
}

impl RunConfig {
    /// Set the runeforge layout.
    #[must_use]
    pub fn with_runeforges(mut self, count: usize, capacity: usize) -> Self {
        self.runeforge_count = count;
        self.runeforge_capacity = capacity;
        self
    }

    /// Set the per-round draw count.
    #[must_use]
    pub fn with_draw_count(mut self, draw_count: usize) -> Self {
        self.draw_count = draw_count;
        self
    }

    /// Set the floor capacity.
    #[must_use]
    pub fn with_floor_capacity(mut self, capacity: usize) -> Self {
        self.floor_capacity = capacity;
        self
    }

    /// Set max health.
    #[must_use]
    pub fn with_max_health(mut self, health: u32) -> Self {
        self.max_health = health;
        self
    }

    /// Set starting armor.
    #[must_use]
    pub fn with_starting_armor(mut self, armor: u32) -> Self {
        self.starting_armor = armor;
        self
    }

    /// Set the base score target.
    #[must_use]
    pub fn with_base_target_score(mut self, score: u32) -> Self {
        self.base_target_score = score;
        self
    }

    /// Set the starting deck composition.
    #[must_use]
    pub fn with_starting_runes_per_type(mut self, count: usize) -> Self {
        self.starting_runes_per_type = count;
        self
    }

    /// Score needed to win game `game_index`.
    #[must_use]
    pub fn target_score(&self, game_index: u32) -> u32 {
        self.base_target_score.saturating_mul(game_index.saturating_add(1))
    }

    /// Check the config describes a playable run.
    pub fn validate(&self) -> Result<(), EngineError> {
        let reason = if self.runeforge_count == 0 || self.runeforge_count > u8::MAX as usize {
            Some("runeforge count must be 1..=255")
        } else if self.runeforge_capacity == 0 {
            Some("runeforge capacity must be positive")
        } else if self.draw_count == 0 {
            Some("draw count must be positive")
        } else if self.draw_count > self.runeforge_count * self.runeforge_capacity {
            Some("draw count exceeds total runeforge capacity")
        } else if self.max_health == 0 {
            Some("max health must be positive")
        } else if self.starting_runes_per_type == 0 {
            Some("starting deck must not be empty")
        } else if self.min_deck_size > self.starting_runes_per_type * RuneType::COUNT {
            Some("minimum deck size exceeds starting deck")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(SelectionError::InvalidConfig(reason).into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = RunConfig::default()
            .with_runeforges(4, 3)
            .with_draw_count(10)
            .with_floor_capacity(5)
            .with_max_health(30)
            .with_starting_armor(2)
            .with_base_target_score(15);

        assert_eq!(config.runeforge_count, 4);
        assert_eq!(config.runeforge_capacity, 3);
        assert_eq!(config.draw_count, 10);
        assert_eq!(config.floor_capacity, 5);
        assert_eq!(config.max_health, 30);
        assert_eq!(config.starting_armor, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_target_score_scales_with_game_index() {
        let config = RunConfig::default().with_base_target_score(20);
        assert_eq!(config.target_score(0), 20);
        assert_eq!(config.target_score(1), 40);
        assert_eq!(config.target_score(4), 100);
    }

    #[test]
    fn test_validate_rejects_oversized_draw() {
        let config = RunConfig::default().with_runeforges(2, 2).with_draw_count(5);
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidSelection {
                reason: SelectionError::InvalidConfig(_)
            })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_health() {
        assert!(RunConfig::default().with_max_health(0).validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = RunConfig::default().with_floor_capacity(3);
        let json = serde_json::to_string(&config).unwrap();
        let restored: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
