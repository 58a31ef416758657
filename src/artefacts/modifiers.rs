//! Artefact modifier pipeline.
//!
//! Every modifier is a pure function taking an explicit `active` flag, so
//! each one can be exercised on its own. The `apply_*` helpers compose them
//! in the fixed order below; the order matters because the multipliers
//! compound:
//!
//! 1. Tome: isolated placements (segment size 1) ×10 damage/healing/armor
//! 2. Potion: outgoing damage and armor ×2
//! 3. Potion: incoming damage ×3
//! 4. Rod: incoming damage also scores; outgoing healing ×2
//! 5. Ring: epic draft odds ×2
//! 6. Robe: one extra draft pick, capped at `MAX_DRAFT_PICKS`

use super::artefact::{ActiveArtefacts, ArtefactId};
use crate::runes::RarityChances;
use crate::wall::{ResolutionStep, ResolvedSegment};

/// Tome multiplier for isolated placements.
pub const TOME_MULTIPLIER: u32 = 10;

/// Potion multiplier on outgoing damage and armor.
pub const POTION_OUTGOING_MULTIPLIER: u32 = 2;

/// Potion multiplier on incoming damage.
pub const POTION_INCOMING_MULTIPLIER: u32 = 3;

/// Rod multiplier on healing.
pub const ROD_HEALING_MULTIPLIER: u32 = 2;

/// Upper bound on deck-building picks.
pub const MAX_DRAFT_PICKS: usize = 3;

fn mark(segment: &mut ResolvedSegment, artefact: ArtefactId) {
    segment.resolution_steps.push(ResolutionStep::Artefact { artefact });
}

/// Tome: multiply an isolated placement's damage, healing and armor by 10.
///
/// Identity for segments of two or more.
#[must_use]
pub fn modify_segment_result_with_tome(mut segment: ResolvedSegment, active: bool) -> ResolvedSegment {
    if !active || segment.segment_size != 1 {
        return segment;
    }
    segment.damage = segment.damage.saturating_mul(TOME_MULTIPLIER);
    segment.healing = segment.healing.saturating_mul(TOME_MULTIPLIER);
    segment.armor = segment.armor.saturating_mul(TOME_MULTIPLIER);
    mark(&mut segment, ArtefactId::Tome);
    segment
}

/// Potion (outgoing): double damage and armor. Healing is untouched.
#[must_use]
pub fn modify_outgoing_with_potion(mut segment: ResolvedSegment, active: bool) -> ResolvedSegment {
    if !active {
        return segment;
    }
    segment.damage = segment.damage.saturating_mul(POTION_OUTGOING_MULTIPLIER);
    segment.armor = segment.armor.saturating_mul(POTION_OUTGOING_MULTIPLIER);
    mark(&mut segment, ArtefactId::Potion);
    segment
}

/// Rod (outgoing): double healing.
#[must_use]
pub fn modify_healing_with_rod(mut segment: ResolvedSegment, active: bool) -> ResolvedSegment {
    if !active {
        return segment;
    }
    segment.healing = segment.healing.saturating_mul(ROD_HEALING_MULTIPLIER);
    mark(&mut segment, ArtefactId::Rod);
    segment
}

/// Potion (incoming): triple incoming overload damage.
#[must_use]
pub fn modify_incoming_with_potion(damage: u32, active: bool) -> u32 {
    if active {
        damage.saturating_mul(POTION_INCOMING_MULTIPLIER)
    } else {
        damage
    }
}

/// Rod (incoming): score bonus equal to the (post-modifier) incoming damage.
#[must_use]
pub fn modify_incoming_with_rod(damage: u32, active: bool) -> u32 {
    if active {
        damage
    } else {
        0
    }
}

/// Ring: double the epic chance, capped at 100.
///
/// The remaining probability is split between rare and uncommon in the
/// proportion they had before, so the three chances still sum to 100.
#[must_use]
pub fn modify_draft_rarity_with_ring(epic: f64, rare: f64, active: bool) -> RarityChances {
    let base = RarityChances::from_epic_rare(epic, rare);
    if !active {
        return base;
    }

    let boosted_epic = (base.epic * 2.0).min(100.0);
    let remaining = 100.0 - boosted_epic;
    let previous_rest = base.rare + base.uncommon;

    let rare = if previous_rest > 0.0 {
        remaining * base.rare / previous_rest
    } else {
        0.0
    };

    RarityChances {
        epic: boosted_epic,
        rare,
        uncommon: remaining - rare,
    }
}

/// Robe: one more simultaneous deck-building pick, up to `MAX_DRAFT_PICKS`.
#[must_use]
pub fn modify_draft_picks_with_robe(picks: usize, active: bool) -> usize {
    if active {
        (picks + 1).min(MAX_DRAFT_PICKS)
    } else {
        picks
    }
}

/// Incoming damage after artefacts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IncomingDamage {
    /// Damage to absorb with armor, then health.
    pub damage: u32,
    /// Score awarded for taking the hit.
    pub score_bonus: u32,
}

/// Run an outgoing segment result through every active artefact.
#[must_use]
pub fn apply_outgoing_modifiers(segment: ResolvedSegment, artefacts: &ActiveArtefacts) -> ResolvedSegment {
    let segment = modify_segment_result_with_tome(segment, artefacts.contains(ArtefactId::Tome));
    let segment = modify_outgoing_with_potion(segment, artefacts.contains(ArtefactId::Potion));
    modify_healing_with_rod(segment, artefacts.contains(ArtefactId::Rod))
}

/// Run incoming overload damage through every active artefact.
#[must_use]
pub fn apply_incoming_modifiers(damage: u32, artefacts: &ActiveArtefacts) -> IncomingDamage {
    let damage = modify_incoming_with_potion(damage, artefacts.contains(ArtefactId::Potion));
    IncomingDamage {
        damage,
        score_bonus: modify_incoming_with_rod(damage, artefacts.contains(ArtefactId::Rod)),
    }
}

/// Draft odds for a deck-building offer after artefacts.
#[must_use]
pub fn draft_rarity_chances(base: RarityChances, artefacts: &ActiveArtefacts) -> RarityChances {
    modify_draft_rarity_with_ring(base.epic, base.rare, artefacts.contains(ArtefactId::Ring))
}

/// Deck-building picks after artefacts.
#[must_use]
pub fn draft_picks(base: usize, artefacts: &ActiveArtefacts) -> usize {
    modify_draft_picks_with_robe(base, artefacts.contains(ArtefactId::Robe))
}
