//! Artefact identifiers, prices and the active set.

use serde::{Deserialize, Serialize};

/// Most artefacts that can be taken into a run.
pub const MAX_SELECTED_ARTEFACTS: usize = 2;

/// Purchasable artefacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArtefactId {
    /// Doubles epic draft odds.
    Ring,
    /// One extra deck-building pick.
    Robe,
    /// Doubles outgoing damage and armor, triples incoming damage.
    Potion,
    /// Incoming damage also scores; doubles healing.
    Rod,
    /// Isolated placements count tenfold.
    Tome,
}

impl ArtefactId {
    /// Every artefact, in shop order.
    pub const ALL: [ArtefactId; 5] = [
        ArtefactId::Tome,
        ArtefactId::Potion,
        ArtefactId::Rod,
        ArtefactId::Ring,
        ArtefactId::Robe,
    ];

    /// Price in arcane dust.
    #[must_use]
    pub const fn cost(self) -> u64 {
        match self {
            ArtefactId::Tome => 100,
            ArtefactId::Potion => 120,
            ArtefactId::Rod => 150,
            ArtefactId::Ring => 200,
            ArtefactId::Robe => 250,
        }
    }
}

/// The artefacts active for a run. At most `MAX_SELECTED_ARTEFACTS`.
///
/// Kept sorted and deduplicated so equal sets serialize identically.
/// Serialized as a plain id list; deserializing goes through
/// [`ActiveArtefacts::from_ids`], so stored data cannot exceed the limit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ArtefactId>", into = "Vec<ArtefactId>")]
pub struct ActiveArtefacts {
    ids: Vec<ArtefactId>,
}

impl ActiveArtefacts {
    /// No artefacts.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from any list, dropping duplicates and anything past the limit.
    pub fn from_ids(ids: impl IntoIterator<Item = ArtefactId>) -> Self {
        let mut unique: Vec<ArtefactId> = Vec::new();
        for id in ids {
            if !unique.contains(&id) && unique.len() < MAX_SELECTED_ARTEFACTS {
                unique.push(id);
            }
        }
        unique.sort();
        Self { ids: unique }
    }

    /// Whether `id` is active.
    #[must_use]
    pub fn contains(&self, id: ArtefactId) -> bool {
        self.ids.contains(&id)
    }

    /// Active ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> &[ArtefactId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<ArtefactId>> for ActiveArtefacts {
    fn from(ids: Vec<ArtefactId>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<ActiveArtefacts> for Vec<ArtefactId> {
    fn from(active: ActiveArtefacts) -> Self {
        active.ids
    }
}
