//! Solo rune-drafting run.
//!
//! A single player drafts runes from runeforges, stages them on pattern
//! lines and resolves full lines onto the spell wall to reach each game's
//! score target, while overflow overloads them. Wins open a deck-building
//! offer; a loss ends the run.
//!
//! - `SoloGame` implements `RulesEngine` over `SoloAction`
//! - `SoloSession` wraps a run with the persistent profile

mod game;
mod session;

pub use game::{SoloGame, SoloGameBuilder};
pub use session::SoloSession;
