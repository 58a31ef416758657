//! Overload damage.
//!
//! Runes that fit neither on a line nor on the floor hit the player. The
//! damage per rune grows with the game index and stops growing after the
//! last table entry.

use crate::core::PlayerStats;

/// Base damage per overloaded rune, indexed by game.
pub const OVERLOAD_DAMAGE_PROGRESSION: [u32; 33] = [
    1, 1, 2, 2, 3, 3, 4, 5, 6, 7, //
    8, 10, 12, 14, 16, 18, 20, 23, 26, 29, //
    32, 36, 40, 45, 50, 55, 60, 66, 72, 78, //
    85, 92, 100,
];

/// Per-rune overload damage for `game_index`, clamped to the last entry.
#[must_use]
pub fn overload_damage_for_game(game_index: u32) -> u32 {
    let last = OVERLOAD_DAMAGE_PROGRESSION.len() - 1;
    OVERLOAD_DAMAGE_PROGRESSION[(game_index as usize).min(last)]
}

/// Deal `overflow_count * per_rune` damage. Armor absorbs first.
///
/// Returns the damage that reached health. Health floors at 0.
pub fn apply_solo_overload_damage(stats: &mut PlayerStats, overflow_count: usize, per_rune: u32) -> u32 {
    let total = u32::try_from(overflow_count)
        .unwrap_or(u32::MAX)
        .saturating_mul(per_rune);

    let absorbed = total.min(stats.current_armor);
    stats.current_armor -= absorbed;

    let to_health = total - absorbed;
    stats.current_health = stats.current_health.saturating_sub(to_health);
    to_health
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_table_shape() {
        assert_eq!(OVERLOAD_DAMAGE_PROGRESSION.len(), 33);
        assert_eq!(OVERLOAD_DAMAGE_PROGRESSION[32], 100);
        assert!(OVERLOAD_DAMAGE_PROGRESSION.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_lookup_clamps() {
        assert_eq!(overload_damage_for_game(0), 1);
        assert_eq!(overload_damage_for_game(32), 100);
        assert_eq!(overload_damage_for_game(40), 100);
        assert_eq!(overload_damage_for_game(u32::MAX), 100);
    }

    #[test]
    fn test_armor_absorbs_first() {
        let mut stats = PlayerStats::new(20, 5);
        let to_health = apply_solo_overload_damage(&mut stats, 2, 4);

        assert_eq!(to_health, 3);
        assert_eq!(stats.current_armor, 0);
        assert_eq!(stats.current_health, 17);
    }

    #[test]
    fn test_armor_covers_everything() {
        let mut stats = PlayerStats::new(20, 10);
        assert_eq!(apply_solo_overload_damage(&mut stats, 3, 2), 0);
        assert_eq!(stats.current_armor, 4);
        assert_eq!(stats.current_health, 20);
    }

    #[test]
    fn test_health_floors_at_zero() {
        let mut stats = PlayerStats::new(5, 0);
        assert_eq!(apply_solo_overload_damage(&mut stats, 4, 100), 400);
        assert_eq!(stats.current_health, 0);
        assert!(stats.is_dead());
    }

    proptest! {
        #[test]
        fn prop_armor_before_health(health in 1u32..500, armor in 0u32..500, count in 0usize..20, per_rune in 0u32..100) {
            let mut stats = PlayerStats::new(health, armor);
            let to_health = apply_solo_overload_damage(&mut stats, count, per_rune);
            let total = count as u32 * per_rune;

            if total <= armor {
                prop_assert_eq!(stats.current_health, health);
                prop_assert_eq!(stats.current_armor, armor - total);
            } else {
                prop_assert_eq!(stats.current_armor, 0);
                prop_assert_eq!(to_health, total - armor);
                prop_assert_eq!(stats.current_health, health.saturating_sub(total - armor));
            }
        }
    }
}
