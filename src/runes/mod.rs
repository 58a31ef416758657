//! Rune model: types, rarities, effects, draft odds and the deck.
//!
//! ## Key Types
//!
//! - `Rune`: an immutable rune with a stable `RuneId`
//! - `RuneType` / `Rarity`: the fixed type and rarity enumerations
//! - `RuneEffect`: rarity-scaled modifier attached at creation
//! - `RarityChances`: draft odds for deck-building offers
//! - `Deck`: collection, per-game draw pile and overload record

pub mod deck;
pub mod rarity;
pub mod rune;

pub use deck::Deck;
pub use rarity::RarityChances;
pub use rune::{Rarity, Rune, RuneEffect, RuneType};
