//! Rune types, rarities and rarity-scaled effects.

use serde::{Deserialize, Serialize};

use crate::core::RuneId;

/// The fixed set of rune types. Order defines the wall's diagonal layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuneType {
    Fire,
    Frost,
    Life,
    Void,
    Wind,
    Lightning,
}

impl RuneType {
    /// Number of rune types.
    pub const COUNT: usize = 6;

    /// All rune types in layout order.
    pub const ALL: [RuneType; Self::COUNT] = [
        RuneType::Fire,
        RuneType::Frost,
        RuneType::Life,
        RuneType::Void,
        RuneType::Wind,
        RuneType::Lightning,
    ];

    /// Position in [`RuneType::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`RuneType::index`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Rarity tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
}

impl Rarity {
    /// Effect magnitude granted by this rarity (common runes have none).
    #[must_use]
    pub const fn tier(self) -> u32 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
        }
    }

    /// Arcane dust returned when a rune of this rarity is disenchanted.
    #[must_use]
    pub const fn disenchant_value(self) -> u64 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 3,
            Rarity::Rare => 6,
            Rarity::Epic => 10,
        }
    }
}

/// Modifier attached to a rune when it is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuneEffect {
    /// Bonus damage for the segment this rune belongs to.
    Damage(u32),
    /// Healing for the player.
    Healing(u32),
    /// Armor for the player.
    Armor(u32),
    /// Arcane dust credited to the profile.
    ArcaneDust(u32),
    /// Contributes to channel synergy when two or more share a segment.
    Channel(u32),
}

impl RuneEffect {
    /// The effect a rune of this type and rarity carries, if any.
    #[must_use]
    pub fn for_rune(rune_type: RuneType, rarity: Rarity) -> Option<Self> {
        let magnitude = rarity.tier();
        if magnitude == 0 {
            return None;
        }
        Some(match rune_type {
            RuneType::Fire | RuneType::Lightning => RuneEffect::Damage(magnitude),
            RuneType::Life => RuneEffect::Healing(magnitude),
            RuneType::Frost => RuneEffect::Armor(magnitude),
            RuneType::Void => RuneEffect::ArcaneDust(magnitude),
            RuneType::Wind => RuneEffect::Channel(magnitude),
        })
    }
}

/// A single rune. Immutable once created; it only moves between containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rune {
    pub id: RuneId,
    pub rune_type: RuneType,
    pub rarity: Rarity,
    pub effect: Option<RuneEffect>,
}

impl Rune {
    /// Create a rune, attaching the effect its rarity grants.
    #[must_use]
    pub fn new(id: RuneId, rune_type: RuneType, rarity: Rarity) -> Self {
        Self {
            id,
            rune_type,
            rarity,
            effect: RuneEffect::for_rune(rune_type, rarity),
        }
    }

    /// Create a common rune.
    #[must_use]
    pub fn common(id: RuneId, rune_type: RuneType) -> Self {
        Self::new(id, rune_type, Rarity::Common)
    }
}
