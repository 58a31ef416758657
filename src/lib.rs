//! # rune-wall
//!
//! A solo rune-drafting and wall-resolution engine.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: every transition is a named function taking
//!    `&mut GameState`. There are no globals, and the whole run serializes.
//!
//! 2. **Validate Before Mutate**: a rejected action returns an
//!    `EngineError` and leaves the state exactly as it was.
//!
//! 3. **Pure Modifiers**: artefacts are pure functions over numbers, so
//!    each can be tested on its own and composed in a fixed order.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: pools and history use `im-rs`, so a
//!   draft snapshots its source in O(1) and cancelling restores it exactly.
//!
//! - **Deterministic RNG**: one seeded ChaCha8 stream per run drives deck
//!   shuffles and offer rolls; it serializes with the run.
//!
//! ## Modules
//!
//! - `core`: Ids, RNG, config, errors, actions, run state
//! - `runes`: Runes, rarities, effects and the deck
//! - `draft`: Runeforges, center pool, drafting and cancellation
//! - `lines`: Pattern lines, floor line and overflow
//! - `wall`: Spell wall grid and segment resolution
//! - `artefacts`: Artefacts and the modifier pipeline
//! - `progression`: Games, rounds, overload, deck building
//! - `persistence`: Key-value stores and the player profile
//! - `rules`: RulesEngine trait
//! - `games`: The solo game and session

pub mod core;
pub mod runes;
pub mod draft;
pub mod lines;
pub mod wall;
pub mod artefacts;
pub mod progression;
pub mod persistence;
pub mod rules;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, EngineError, ErrorSeverity, GameRng, GameRngState, GameState, PlayerId,
    PlayerStats, RunConfig, RuneId, RuneScore, RuneforgeId, SelectionError, SoloAction, WALL_SIZE,
};

pub use crate::runes::{Deck, Rarity, RarityChances, Rune, RuneEffect, RuneType};

pub use crate::draft::{DraftBoard, DraftSource, SourceId};

pub use crate::lines::{FloorLine, PatternLine, PlacementOutcome};

pub use crate::wall::{Cell, ResolutionStep, ResolvedSegment, SpellWall};

pub use crate::artefacts::{ActiveArtefacts, ArtefactId, MAX_SELECTED_ARTEFACTS};

pub use crate::progression::{DeckDraftOffer, DefeatReason, RoundEnd, RunStatus};

pub use crate::persistence::{FileStore, InMemoryStore, KeyValueStore, ProfileStore, StorageError};

pub use crate::rules::{ActionOutcome, GameResult, RulesEngine};

pub use crate::games::solo::{SoloGame, SoloGameBuilder, SoloSession};
