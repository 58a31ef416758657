//! Drafting pools: runeforges and the center pool.
//!
//! Pools store runes in `im::Vector`, so the draft engine can snapshot a
//! pool in O(1) before mutating it and restore the snapshot on cancel.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, RuneforgeId};
use crate::runes::{Rune, RuneType};

/// A bounded drafting pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runeforge {
    pub id: RuneforgeId,
    pub owner_id: PlayerId,
    pub capacity: usize,
    pub disabled: bool,
    pub runes: Vector<Rune>,
}

impl Runeforge {
    /// Create an empty, enabled runeforge.
    #[must_use]
    pub fn new(id: RuneforgeId, owner_id: PlayerId, capacity: usize) -> Self {
        Self {
            id,
            owner_id,
            capacity,
            disabled: false,
            runes: Vector::new(),
        }
    }

    /// Enabled and holding at least one rune.
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        !self.disabled && !self.runes.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.runes.len() >= self.capacity
    }

    #[must_use]
    pub fn contains_type(&self, rune_type: RuneType) -> bool {
        self.runes.iter().any(|r| r.rune_type == rune_type)
    }
}

/// Unbounded pool of runes passed over during drafting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterPool {
    pub runes: Vector<Rune>,
}

impl CenterPool {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.runes.len()
    }

    #[must_use]
    pub fn contains_type(&self, rune_type: RuneType) -> bool {
        self.runes.iter().any(|r| r.rune_type == rune_type)
    }
}

/// Split `runes` into those of `rune_type` and the rest, keeping order.
#[must_use]
pub fn partition_by_type(runes: &Vector<Rune>, rune_type: RuneType) -> (Vec<Rune>, Vector<Rune>) {
    let mut picked = Vec::new();
    let mut rest = Vector::new();
    for rune in runes {
        if rune.rune_type == rune_type {
            picked.push(*rune);
        } else {
            rest.push_back(*rune);
        }
    }
    (picked, rest)
}

/// Deal runes round-robin into runeforges with free capacity.
///
/// Returns runes that did not fit anywhere.
pub fn deal_runes(runeforges: &mut [Runeforge], runes: Vec<Rune>) -> Vec<Rune> {
    let mut leftover = Vec::new();
    let mut next = 0;
    for rune in runes {
        let open = (0..runeforges.len())
            .map(|offset| (next + offset) % runeforges.len())
            .find(|&i| !runeforges[i].disabled && !runeforges[i].is_full());
        match open {
            Some(i) => {
                runeforges[i].runes.push_back(rune);
                next = (i + 1) % runeforges.len();
            }
            None => leftover.push(rune),
        }
    }
    leftover
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RuneId;

    fn runes(types: &[RuneType]) -> Vec<Rune> {
        types
            .iter()
            .enumerate()
            .map(|(i, &t)| Rune::common(RuneId(i as u32), t))
            .collect()
    }

    #[test]
    fn test_accessibility() {
        let mut forge = Runeforge::new(RuneforgeId(0), PlayerId::SOLO, 4);
        assert!(!forge.is_accessible());

        forge.runes.push_back(Rune::common(RuneId(1), RuneType::Fire));
        assert!(forge.is_accessible());

        forge.disabled = true;
        assert!(!forge.is_accessible());
    }

    #[test]
    fn test_partition_keeps_order() {
        let pool: Vector<Rune> = runes(&[RuneType::Fire, RuneType::Frost, RuneType::Fire, RuneType::Void])
            .into_iter()
            .collect();
        let (picked, rest) = partition_by_type(&pool, RuneType::Fire);

        assert_eq!(picked.iter().map(|r| r.id).collect::<Vec<_>>(), vec![RuneId(0), RuneId(2)]);
        assert_eq!(rest.iter().map(|r| r.id).collect::<Vec<_>>(), vec![RuneId(1), RuneId(3)]);
    }

    #[test]
    fn test_deal_round_robin() {
        let mut forges: Vec<_> = (0..3)
            .map(|i| Runeforge::new(RuneforgeId(i), PlayerId::SOLO, 2))
            .collect();
        let leftover = deal_runes(&mut forges, runes(&[RuneType::Fire; 5]));

        assert!(leftover.is_empty());
        assert_eq!(forges[0].runes.len(), 2);
        assert_eq!(forges[1].runes.len(), 2);
        assert_eq!(forges[2].runes.len(), 1);
    }

    #[test]
    fn test_deal_skips_disabled_and_returns_overflow() {
        let mut forges: Vec<_> = (0..2)
            .map(|i| Runeforge::new(RuneforgeId(i), PlayerId::SOLO, 2))
            .collect();
        forges[0].disabled = true;

        let leftover = deal_runes(&mut forges, runes(&[RuneType::Wind; 3]));
        assert!(forges[0].runes.is_empty());
        assert_eq!(forges[1].runes.len(), 2);
        assert_eq!(leftover.len(), 1);
    }
}
