//! Core engine types: ids, RNG, configuration, errors, actions, state.
//!
//! Everything above this module (drafting, lines, the wall, progression)
//! works on these types. `GameState` is the single state container passed
//! by `&mut` through every transition.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod rng;
pub mod state;

pub use action::{ActionRecord, SoloAction};
pub use config::{RunConfig, WALL_SIZE};
pub use entity::{PlayerId, RuneId, RuneIdAllocator, RuneforgeId};
pub use error::{EngineError, ErrorSeverity, SelectionError};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, PlayerStats, RuneScore};
